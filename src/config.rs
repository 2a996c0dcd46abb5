use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::profile::DifficultyKey;
use crate::session::controller::DEFAULT_SESSION_SECS;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_session_secs")]
    pub session_secs: u32,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_difficulty() -> String {
    DifficultyKey::Easy.as_str().to_string()
}
fn default_session_secs() -> u32 {
    DEFAULT_SESSION_SECS
}
fn default_tick_rate_ms() -> u64 {
    50
}
fn default_theme() -> String {
    "margherita".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            session_secs: default_session_secs(),
            tick_rate_ms: default_tick_rate_ms(),
            theme: default_theme(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typing-feast")
            .join("config.toml")
    }

    pub fn difficulty_key(&self) -> DifficultyKey {
        self.difficulty.parse().unwrap_or(DifficultyKey::Easy)
    }

    /// Resets values an old or hand-edited file may carry to usable ones.
    pub fn normalize(&mut self) {
        match self.difficulty.parse::<DifficultyKey>() {
            Ok(key) => self.difficulty = key.as_str().to_string(),
            Err(_) => self.difficulty = default_difficulty(),
        }
        if self.session_secs == 0 {
            self.session_secs = default_session_secs();
        }
        if self.tick_rate_ms == 0 {
            self.tick_rate_ms = default_tick_rate_ms();
        }
    }
}
