use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DifficultyKey {
    Easy,
    Medium,
    Hard,
}

impl DifficultyKey {
    pub const ALL: [DifficultyKey; 3] = [DifficultyKey::Easy, DifficultyKey::Medium, DifficultyKey::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyKey::Easy => "easy",
            DifficultyKey::Medium => "medium",
            DifficultyKey::Hard => "hard",
        }
    }

    pub fn profile(self) -> &'static DifficultyProfile {
        match self {
            DifficultyKey::Easy => &EASY,
            DifficultyKey::Medium => &MEDIUM,
            DifficultyKey::Hard => &HARD,
        }
    }
}

impl fmt::Display for DifficultyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyKey {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "facile" => Ok(DifficultyKey::Easy),
            "medium" | "medio" => Ok(DifficultyKey::Medium),
            "hard" | "difficile" => Ok(DifficultyKey::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Tuning bundle selected once per session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub key: DifficultyKey,
    pub label: &'static str,
    pub phrase_time_limit_secs: u32,
    pub time_bonus_on_success: u32,
    /// Inclusive `[min, max]` cost window before the dynamic offset is applied.
    pub cost_range: (u8, u8),
    pub difficulty_ramp_step: i32,
}

pub const EASY: DifficultyProfile = DifficultyProfile {
    key: DifficultyKey::Easy,
    label: "Facile",
    phrase_time_limit_secs: 8,
    time_bonus_on_success: 2,
    cost_range: (1, 3),
    difficulty_ramp_step: 1,
};

pub const MEDIUM: DifficultyProfile = DifficultyProfile {
    key: DifficultyKey::Medium,
    label: "Medio",
    phrase_time_limit_secs: 11,
    time_bonus_on_success: 3,
    cost_range: (2, 4),
    difficulty_ramp_step: 2,
};

pub const HARD: DifficultyProfile = DifficultyProfile {
    key: DifficultyKey::Hard,
    label: "Difficile",
    phrase_time_limit_secs: 15,
    time_bonus_on_success: 4,
    cost_range: (3, 5),
    difficulty_ramp_step: 3,
};
