use crate::error::{GameError, Result};
use crate::phrase::{MAX_COST, MIN_COST, Phrase};

const PHRASES_IT: &str = include_str!("../../assets/phrases-it.json");

/// Static phrase collection, queried by inclusive cost range.
#[derive(Clone, Debug)]
pub struct PhraseBank {
    phrases: Vec<Phrase>,
}

impl PhraseBank {
    /// The bundled Italian phrase set.
    pub fn italian() -> Result<Self> {
        Self::from_json(PHRASES_IT)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let phrases: Vec<Phrase> = serde_json::from_str(json)?;
        Self::new(phrases)
    }

    pub fn new(phrases: Vec<Phrase>) -> Result<Self> {
        if let Some(blank) = phrases.iter().find(|p| p.text.trim().is_empty()) {
            return Err(GameError::EmptyPhrase {
                translation: blank.translation.clone(),
            });
        }
        if let Some(bad) = phrases
            .iter()
            .find(|p| !(MIN_COST..=MAX_COST).contains(&p.cost))
        {
            return Err(GameError::InvalidCost {
                text: bad.text.clone(),
                cost: bad.cost,
            });
        }
        Ok(Self { phrases })
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn in_cost_range(&self, min: u8, max: u8) -> Vec<&Phrase> {
        self.phrases
            .iter()
            .filter(|p| p.cost >= min && p.cost <= max)
            .collect()
    }

    /// Fails when no phrase falls inside `[min, max]`; selection relies on
    /// every profile's base range being populated.
    pub fn ensure_covers(&self, min: u8, max: u8) -> Result<()> {
        if self.phrases.iter().any(|p| p.cost >= min && p.cost <= max) {
            Ok(())
        } else {
            Err(GameError::EmptyCandidateSet { min, max })
        }
    }
}
