//! Error types shared by the store, config loader and the wasm surface.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the key-value backend behind the progress store.
///
/// These never reach the player: the store logs them and keeps playing from
/// its in-memory state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend is unavailable")]
    Unavailable,
    #[error("could not read `{key}`: {reason}")]
    Read { key: String, reason: String },
    #[error("could not write `{key}`: {reason}")]
    Write { key: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown difficulty `{0}`")]
    UnknownDifficulty(String),
    #[error("level {0} is locked")]
    LevelLocked(usize),
    #[error("nothing to practice yet")]
    NothingToPractice,
    #[error("game has not been started")]
    NotStarted,
    #[error("game is busy, try again")]
    Busy,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
