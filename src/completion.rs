//! Level completion: persist, detect newly finished groups, pick the cue and
//! the next screen.
//!
//! One completion event runs `Idle → Persisting → RewardCheck →
//! FeedbackPlaying → NavigationPending`; the phase returns to `Idle` when the
//! caller takes (or cancels) the pending navigation.

use serde::Serialize;

use crate::feedback::Cue;
use crate::grouping::{Reward, completed_group_indices};
use crate::levels::Level;
use crate::progress::ProgressStore;
use crate::route::Route;

/// Reward waiting to be shown once the player is back on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingReward {
    pub group_index: usize,
    pub reward: Reward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionPhase {
    Idle,
    Persisting,
    RewardCheck,
    FeedbackPlaying,
    NavigationPending,
}

/// What the caller must do after a completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub level_index: usize,
    pub cue: Cue,
    pub newly_completed_groups: Vec<usize>,
    pub navigate_to: Route,
    pub delay_ms: u32,
    pub all_complete: bool,
}

pub struct CompletionOrchestrator<'a> {
    levels: &'a [Level],
    delay_ms: u32,
    pending_reward: Option<PendingReward>,
    pending_navigation: Option<Route>,
    phase: CompletionPhase,
}

impl<'a> CompletionOrchestrator<'a> {
    /// `delay_ms` is the feedback pause before navigating away.
    pub fn new(levels: &'a [Level], delay_ms: u32) -> Self {
        Self {
            levels,
            delay_ms,
            pending_reward: None,
            pending_navigation: None,
            phase: CompletionPhase::Idle,
        }
    }

    pub fn phase(&self) -> CompletionPhase {
        self.phase
    }

    fn enter(&mut self, phase: CompletionPhase) {
        log::debug!("completion {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Handle a finished level. An index outside the catalog changes nothing
    /// and yields `None`.
    pub fn complete_level(&mut self, store: &mut ProgressStore, level_index: usize) -> Option<CompletionOutcome> {
        if level_index >= self.levels.len() {
            log::warn!("completion for unknown level {level_index} ignored");
            return None;
        }
        let groups_before = completed_group_indices(self.levels, store.completed_levels());

        self.enter(CompletionPhase::Persisting);
        store.mark_level_complete(level_index);

        self.enter(CompletionPhase::RewardCheck);
        // The store may have failed to write, but its in-memory set is current.
        let completed_after = store.completed_levels();
        let groups_after = completed_group_indices(self.levels, completed_after);
        let newly_completed_groups: Vec<usize> = groups_after
            .iter()
            .copied()
            .filter(|g| !groups_before.contains(g))
            .collect();

        self.enter(CompletionPhase::FeedbackPlaying);
        let cue = match newly_completed_groups.first() {
            Some(&group_index) => {
                if newly_completed_groups.len() > 1 {
                    log::warn!(
                        "level {level_index} closed {} groups at once, keeping only group {group_index}",
                        newly_completed_groups.len()
                    );
                }
                let reward = Reward::for_group(group_index);
                log::info!("group {} completed, {:?} earned", group_index + 1, reward);
                self.pending_reward = Some(PendingReward { group_index, reward });
                Cue::Victory
            }
            None => Cue::Correct,
        };

        let all_complete = completed_after.len() == self.levels.len();
        let navigate_to = if all_complete {
            Route::Victory
        } else {
            Route::Map {
                scroll_to: Some((level_index + 1).min(self.levels.len() - 1)),
            }
        };
        log::info!("level {level_index} completed, next {navigate_to}");

        self.enter(CompletionPhase::NavigationPending);
        self.pending_navigation = Some(navigate_to);

        Some(CompletionOutcome {
            level_index,
            cue,
            newly_completed_groups,
            navigate_to,
            delay_ms: self.delay_ms,
            all_complete,
        })
    }

    /// One-shot read of the pending reward.
    pub fn consume_pending_reward(&mut self) -> Option<PendingReward> {
        self.pending_reward.take()
    }

    pub fn peek_pending_reward(&self) -> Option<PendingReward> {
        self.pending_reward
    }

    /// Take the navigation decided by the last completion, once its delay ran out.
    pub fn take_navigation(&mut self) -> Option<Route> {
        let route = self.pending_navigation.take();
        if route.is_some() {
            self.enter(CompletionPhase::Idle);
        }
        route
    }

    /// Forget a pending navigation, e.g. when the player left the level first.
    pub fn cancel_navigation(&mut self) {
        if self.pending_navigation.take().is_some() {
            self.enter(CompletionPhase::Idle);
        }
    }

    /// Drop every pending signal, used by a full progress reset.
    pub fn clear(&mut self) {
        self.pending_reward = None;
        self.cancel_navigation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelContent;

    const STD: Level = Level::standard("std", &[]);
    const MEMORY: Level = Level::new("memory", LevelContent::Memory);

    #[test]
    fn plain_completion_plays_correct() {
        let levels = [STD, STD, MEMORY];
        let mut store = ProgressStore::in_memory(levels.len());
        let mut orch = CompletionOrchestrator::new(&levels, 2000);
        let out = orch.complete_level(&mut store, 0).unwrap();
        assert_eq!(out.cue, Cue::Correct);
        assert!(out.newly_completed_groups.is_empty());
        assert_eq!(out.navigate_to, Route::Map { scroll_to: Some(1) });
        assert_eq!(out.delay_ms, 2000);
        assert_eq!(orch.phase(), CompletionPhase::NavigationPending);
        assert_eq!(orch.take_navigation(), Some(out.navigate_to));
        assert_eq!(orch.phase(), CompletionPhase::Idle);
        assert_eq!(orch.take_navigation(), None);
    }

    #[test]
    fn unknown_index_is_noop() {
        let levels = [STD];
        let mut store = ProgressStore::in_memory(1);
        let mut orch = CompletionOrchestrator::new(&levels, 0);
        assert!(orch.complete_level(&mut store, 1).is_none());
        assert!(store.completed_levels().is_empty());
        assert_eq!(orch.phase(), CompletionPhase::Idle);
    }

    #[test]
    fn repeated_completion_does_not_rearm_reward() {
        let levels = [MEMORY, STD];
        let mut store = ProgressStore::in_memory(2);
        let mut orch = CompletionOrchestrator::new(&levels, 0);
        let first = orch.complete_level(&mut store, 0).unwrap();
        assert_eq!(first.cue, Cue::Victory);
        assert!(orch.consume_pending_reward().is_some());
        let again = orch.complete_level(&mut store, 0).unwrap();
        assert_eq!(again.cue, Cue::Correct);
        assert!(orch.consume_pending_reward().is_none());
    }
}
