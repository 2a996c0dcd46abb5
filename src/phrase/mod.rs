pub mod bank;

use serde::Deserialize;

pub use bank::PhraseBank;

pub const MIN_COST: u8 = 1;
pub const MAX_COST: u8 = 5;

/// A phrase to transcribe. `cost` drives both selection and scoring.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Phrase {
    pub text: String,
    pub translation: String,
    pub cost: u8,
}

impl Phrase {
    pub fn new(text: &str, translation: &str, cost: u8) -> Self {
        Self {
            text: text.to_string(),
            translation: translation.to_string(),
            cost,
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
