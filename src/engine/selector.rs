use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::engine::profile::DifficultyProfile;
use crate::error::{GameError, Result};
use crate::phrase::{Phrase, PhraseBank};

/// Cost window after shifting the profile range by `offset`. The result may be
/// inverted (`min > max`), which matches no phrase.
pub fn effective_window(profile: &DifficultyProfile, offset: i32) -> (i32, i32) {
    let (min, max) = (profile.cost_range.0 as i32, profile.cost_range.1 as i32);
    (min.max(min + offset), max.min(max + offset))
}

pub struct PhraseSelector<R: Rng> {
    bank: PhraseBank,
    rng: R,
}

impl<R: Rng> PhraseSelector<R> {
    pub fn new(bank: PhraseBank, rng: R) -> Self {
        Self { bank, rng }
    }

    pub fn bank(&self) -> &PhraseBank {
        &self.bank
    }

    /// Uniformly picks a phrase from the offset window, falling back to the
    /// profile's own range when the window is empty.
    pub fn select_next(&mut self, profile: &DifficultyProfile, offset: i32) -> Result<Phrase> {
        let (lo, hi) = effective_window(profile, offset);
        let candidates: Vec<&Phrase> = self
            .bank
            .phrases()
            .iter()
            .filter(|p| (lo..=hi).contains(&(p.cost as i32)))
            .collect();

        let pool = if candidates.is_empty() {
            let (min, max) = profile.cost_range;
            debug!(lo, hi, offset, min, max, "empty cost window, using profile range");
            self.bank.in_cost_range(min, max)
        } else {
            candidates
        };

        pool.choose(&mut self.rng)
            .map(|p| (*p).clone())
            .ok_or(GameError::EmptyCandidateSet {
                min: profile.cost_range.0,
                max: profile.cost_range.1,
            })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::engine::profile::{DifficultyKey, EASY, HARD, MEDIUM};

    fn graded_bank() -> PhraseBank {
        PhraseBank::new(
            (1..=5)
                .flat_map(|cost| {
                    (0..3).map(move |i| Phrase::new(&format!("c{cost}-{i}"), "", cost))
                })
                .collect(),
        )
        .unwrap()
    }

    fn selector(bank: PhraseBank) -> PhraseSelector<SmallRng> {
        PhraseSelector::new(bank, SmallRng::seed_from_u64(7))
    }

    #[test]
    fn test_window_at_zero_offset_is_profile_range() {
        assert_eq!(effective_window(&EASY, 0), (1, 3));
        assert_eq!(effective_window(&MEDIUM, 0), (2, 4));
        assert_eq!(effective_window(&HARD, 0), (3, 5));
    }

    #[test]
    fn test_positive_offset_raises_lower_bound_only() {
        assert_eq!(effective_window(&EASY, 1), (2, 3));
        assert_eq!(effective_window(&EASY, 2), (3, 3));
        assert_eq!(effective_window(&EASY, 3), (4, 3));
    }

    #[test]
    fn test_selection_stays_in_window() {
        let mut sel = selector(graded_bank());
        for _ in 0..200 {
            let phrase = sel.select_next(&EASY, 1).unwrap();
            assert!((2..=3).contains(&phrase.cost), "cost {} outside 2..=3", phrase.cost);
        }
    }

    #[test]
    fn test_inverted_window_falls_back_to_profile_range() {
        let mut sel = selector(graded_bank());
        for _ in 0..200 {
            let phrase = sel.select_next(&EASY, 10).unwrap();
            assert!((1..=3).contains(&phrase.cost));
        }
    }

    #[test]
    fn test_never_empty_for_any_offset() {
        let mut sel = selector(PhraseBank::italian().unwrap());
        for key in DifficultyKey::ALL {
            for offset in 0..20 {
                assert!(sel.select_next(key.profile(), offset).is_ok());
            }
        }
    }

    #[test]
    fn test_sparse_window_picks_remaining_cost() {
        // Only costs 1 and 3 exist: offset 1 on easy gives [2, 3] which still has cost 3.
        let bank = PhraseBank::new(vec![Phrase::new("uno", "", 1), Phrase::new("tre", "", 3)]).unwrap();
        let mut sel = selector(bank);
        for _ in 0..50 {
            assert_eq!(sel.select_next(&EASY, 1).unwrap().text, "tre");
        }
    }

    #[test]
    fn test_empty_window_falls_back_to_profile_range() {
        // Offset 1 on easy gives [2, 3], which has nothing; easy's own [1, 3] has "uno".
        let bank = PhraseBank::new(vec![Phrase::new("uno", "", 1), Phrase::new("cinque", "", 5)]).unwrap();
        assert_eq!(effective_window(&EASY, 1), (2, 3));
        let mut sel = selector(bank);
        for _ in 0..50 {
            assert_eq!(sel.select_next(&EASY, 1).unwrap().text, "uno");
        }
    }

    #[test]
    fn test_empty_fallback_is_an_error() {
        let bank = PhraseBank::new(vec![Phrase::new("uno", "", 1)]).unwrap();
        let mut sel = selector(bank);
        let err = sel.select_next(&HARD, 0).unwrap_err();
        assert!(matches!(err, GameError::EmptyCandidateSet { min: 3, max: 5 }));
    }

    #[test]
    fn test_selection_reaches_every_candidate() {
        let mut sel = selector(graded_bank());
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(sel.select_next(&HARD, 0).unwrap().text);
        }
        assert_eq!(seen.len(), 9);
    }
}
