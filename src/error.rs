use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("phrase '{text}' has cost {cost}, expected 1..=5")]
    InvalidCost { text: String, cost: u8 },

    #[error("no phrase with cost in {min}..={max}")]
    EmptyCandidateSet { min: u8, max: u8 },

    #[error("a session is already being played")]
    SessionAlreadyActive,

    #[error("a session can only start from the title screen")]
    NotOnTitle,

    #[error("phrase with translation '{translation}' has no text")]
    EmptyPhrase { translation: String },

    #[error("failed to parse phrase bank: {0}")]
    PhraseBank(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
