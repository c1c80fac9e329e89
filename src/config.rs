//! Game configuration.
//!
//! The host page may hand a TOML document to `start_game`. Every key is
//! optional; missing keys, and a document that fails to parse, fall back to
//! the defaults below.

use serde::Deserialize;

use crate::error::ConfigError;

// ── Public Config Structs ──

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub scoring: ScoringConfig,
    pub rounds: RoundsConfig,
    pub speech: SpeechConfig,
    pub audio: AudioConfig,
    pub logging: LoggingConfig,
    pub storage: StorageKeys,
}

/// Pacing delays in milliseconds.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimingConfig {
    pub short_ms: u32,
    pub feedback_ms: u32,
    pub wrong_ms: u32,
    pub transition_ms: u32, // also the delay before leaving a finished level
    pub wrong_long_ms: u32,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScoringConfig {
    pub correct: u32,
    pub correct_double: u32,
    pub penalty: u32,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoundsConfig {
    pub required: u32,
    pub review: u32,
    pub memory_pairs: usize,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpeechConfig {
    pub lang: String,
    pub rate: f32,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// localStorage keys of the three persisted values.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageKeys {
    pub score_key: String,
    pub completed_key: String,
    pub difficulty_key: String,
}

/// Per-game knobs handed to the mini-games.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameRules {
    pub timing: TimingConfig,
    pub scoring: ScoringConfig,
    pub rounds: RoundsConfig,
}

// ── Defaults ──

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            short_ms: 500,
            feedback_ms: 1000,
            wrong_ms: 1500,
            transition_ms: 2000,
            wrong_long_ms: 2500,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            correct: 10,
            correct_double: 20,
            penalty: 5,
        }
    }
}

impl Default for RoundsConfig {
    fn default() -> Self {
        RoundsConfig {
            required: 3,
            review: 5,
            memory_pairs: 8,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        SpeechConfig {
            lang: "en-US".into(),
            rate: 0.8,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig { enabled: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".into(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        StorageKeys {
            score_key: "englishGameScore".into(),
            completed_key: "englishGameCompletedLevels".into(),
            difficulty_key: "englishGameDifficulty".into(),
        }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        GameConfig::default().rules()
    }
}

// ── Loading ──

impl GameConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Parse `text` when given. A parse error is logged and yields the defaults.
    pub fn load_or_default(text: Option<&str>) -> Self {
        match text.map(str::trim).filter(|t| !t.is_empty()) {
            None => GameConfig::default(),
            Some(t) => GameConfig::from_toml(t).unwrap_or_else(|e| {
                log::warn!("{e}; using default settings");
                GameConfig::default()
            }),
        }
    }

    pub fn rules(&self) -> GameRules {
        GameRules {
            timing: self.timing,
            scoring: self.scoring,
            rounds: self.rounds,
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.logging.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
