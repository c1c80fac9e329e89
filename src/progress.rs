//! Progress store: score, completed levels and difficulty.
//!
//! Single source of truth for the player's saved state. Every mutation is
//! written through to the backend immediately. Backend failures are logged and
//! otherwise ignored, so the session keeps working from memory when storage is
//! full or blocked. Values read on load are normalized: anything malformed
//! becomes the default instead of an error.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::config::StorageKeys;
use crate::difficulty::Difficulty;
use crate::storage::{KeyValueStore, MemoryStore};

/// Read-only view of the persisted state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub score: u32,
    pub completed_levels: BTreeSet<usize>,
    pub difficulty: Option<Difficulty>,
}

pub type SubscriptionId = usize;

type Observer = Box<dyn FnMut(&ProgressSnapshot)>;

pub struct ProgressStore {
    state: ProgressSnapshot,
    level_count: usize,
    keys: StorageKeys,
    backend: Box<dyn KeyValueStore>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: SubscriptionId,
}

impl ProgressStore {
    /// Restore state from `backend`. `level_count` bounds the valid level indices.
    pub fn load(backend: Box<dyn KeyValueStore>, keys: StorageKeys, level_count: usize) -> Self {
        let state = ProgressSnapshot {
            score: read_key(&*backend, &keys.score_key)
                .map(|raw| parse_score(&raw))
                .unwrap_or(0),
            completed_levels: read_key(&*backend, &keys.completed_key)
                .map(|raw| parse_completed(&raw, level_count))
                .unwrap_or_default(),
            difficulty: read_key(&*backend, &keys.difficulty_key)
                .and_then(|raw| Difficulty::from_stored(&raw)),
        };
        log::debug!(
            "progress loaded: score={} completed={} difficulty={:?}",
            state.score,
            state.completed_levels.len(),
            state.difficulty
        );
        Self {
            state,
            level_count,
            keys,
            backend,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Fresh store backed by memory only.
    pub fn in_memory(level_count: usize) -> Self {
        Self::load(Box::new(MemoryStore::new()), StorageKeys::default(), level_count)
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn completed_levels(&self) -> &BTreeSet<usize> {
        &self.state.completed_levels
    }

    pub fn is_level_completed(&self, index: usize) -> bool {
        self.state.completed_levels.contains(&index)
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.state.difficulty
    }

    pub fn level_count(&self) -> usize {
        self.level_count
    }

    pub fn add_score(&mut self, amount: u32) {
        self.state.score = self.state.score.saturating_add(amount);
        self.persist_score();
        self.notify();
    }

    /// Lower the score, never below zero.
    pub fn subtract_score(&mut self, amount: u32) {
        self.state.score = self.state.score.saturating_sub(amount);
        self.persist_score();
        self.notify();
    }

    /// Record a finished level. Returns `false` for an index outside the
    /// catalog or one that was already recorded; neither changes anything.
    pub fn mark_level_complete(&mut self, index: usize) -> bool {
        if index >= self.level_count {
            log::warn!("ignoring completion of unknown level {index}");
            return false;
        }
        if !self.state.completed_levels.insert(index) {
            return false;
        }
        self.persist_completed();
        self.notify();
        true
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.state.difficulty = Some(difficulty);
        self.persist_difficulty();
        self.notify();
    }

    /// Wipe score, completed levels and difficulty.
    pub fn reset(&mut self) {
        self.state = ProgressSnapshot::default();
        self.persist_score();
        self.persist_completed();
        self.persist_difficulty();
        log::info!("progress reset");
        self.notify();
    }

    /// Register a change callback. It runs after every mutation that was applied.
    pub fn subscribe(&mut self, observer: impl FnMut(&ProgressSnapshot) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.observers.retain(|(sid, _)| *sid != id);
    }

    fn notify(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(&self.state);
        }
    }

    fn persist_score(&mut self) {
        let value = self.state.score.to_string();
        self.write(&self.keys.score_key.clone(), &value);
    }

    fn persist_completed(&mut self) {
        let list: Vec<usize> = self.state.completed_levels.iter().copied().collect();
        match serde_json::to_string(&list) {
            Ok(value) => self.write(&self.keys.completed_key.clone(), &value),
            Err(e) => log::warn!("could not encode completed levels: {e}"),
        }
    }

    fn persist_difficulty(&mut self) {
        match serde_json::to_string(&self.state.difficulty) {
            Ok(value) => self.write(&self.keys.difficulty_key.clone(), &value),
            Err(e) => log::warn!("could not encode difficulty: {e}"),
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.backend.set(key, value) {
            log::warn!("progress not saved: {e}");
        }
    }
}

fn read_key(backend: &dyn KeyValueStore, key: &str) -> Option<String> {
    match backend.get(key) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("progress not restored: {e}");
            None
        }
    }
}

/// Any non-negative JSON number; fractions are truncated, the rest is 0.
fn parse_score(raw: &str) -> u32 {
    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(Value::Number(n)) => n
            .as_f64()
            .filter(|f| f.is_finite() && *f > 0.0)
            .map(|f| f.min(u32::MAX as f64) as u32)
            .unwrap_or(0),
        _ => {
            log::warn!("discarding malformed stored score {raw:?}");
            0
        }
    }
}

/// A JSON array of level indices. Non-integers, negatives and indices past the
/// catalog are dropped.
fn parse_completed(raw: &str, level_count: usize) -> BTreeSet<usize> {
    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_u64)
            .filter_map(|i| usize::try_from(i).ok())
            .filter(|&i| i < level_count)
            .collect(),
        _ => {
            log::warn!("discarding malformed completed levels {raw:?}");
            BTreeSet::new()
        }
    }
}
