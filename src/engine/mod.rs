pub mod difficulty;
pub mod matcher;
pub mod profile;
pub mod scoring;
pub mod selector;

pub use difficulty::RoundOutcome;
pub use profile::{DifficultyKey, DifficultyProfile};
pub use selector::PhraseSelector;
