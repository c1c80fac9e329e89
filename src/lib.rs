//! Vocab Fox core crate.
//!
//! English vocabulary game for Czech-speaking kids. The level catalog is
//! grouped into map sections that unlock one after another; finishing a
//! section earns a crown or a diamond. Round logic, grouping, progress and
//! routing are plain Rust and test natively; `web` wires them to the browser.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod completion;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod feedback;
pub mod games;
pub mod grouping;
pub mod levels;
mod logger;
pub mod progress;
pub mod route;
pub mod storage;
pub mod timers;
mod web;

pub use app::{GameApp, MapView};
pub use completion::{CompletionOrchestrator, CompletionOutcome, PendingReward};
pub use config::GameConfig;
pub use difficulty::Difficulty;
pub use error::{ConfigError, GameError, StorageError};
pub use grouping::{LevelGroup, Reward, calculate_groups};
pub use levels::{Level, LevelKind, levels};
pub use progress::{ProgressSnapshot, ProgressStore};
pub use route::{ReviewMode, Route};
pub use web::{
    add_score, complete_level, consume_pending_reward, current_route, game_input, game_state, go_to_map,
    map_state, open_level, open_practice, reset_all, score, select_difficulty, subtract_score,
};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Boot the game. `config` is an optional TOML document, see [`GameConfig`].
#[wasm_bindgen]
pub fn start_game(config: Option<String>) -> Result<(), JsValue> {
    web::start(config)
}
