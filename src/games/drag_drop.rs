//! Tidy-up: drag each word to the place it belongs.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::{Game, GameHost, GameTimer, PlayerInput, rng_from};
use crate::config::GameRules;
use crate::difficulty::{Difficulty, filter_by_difficulty};
use crate::feedback::Cue;
use crate::levels::{Destination, DragDropItem};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropZone {
    #[serde(flatten)]
    pub destination: Destination,
    /// Emojis already put away here.
    pub dropped: Vec<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragDropGame {
    zones: Vec<DropZone>,
    round: Vec<DragDropItem>,
    remaining: usize,
    locked: bool,
    finished: bool,
    message: &'static str,
    #[serde(skip)]
    pending: Vec<DragDropItem>,
    #[serde(skip)]
    items_per_round: usize,
    #[serde(skip)]
    rules: GameRules,
    #[serde(skip)]
    rng: SmallRng,
}

impl DragDropGame {
    /// Each round deals `items_per_round` random items from those left.
    pub fn new(
        destinations: &[Destination],
        items: &[DragDropItem],
        items_per_round: usize,
        difficulty: Difficulty,
        rules: GameRules,
        seed: u64,
    ) -> Self {
        let pending = filter_by_difficulty(items, difficulty);
        Self {
            zones: destinations
                .iter()
                .map(|&destination| DropZone {
                    destination,
                    dropped: Vec::new(),
                })
                .collect(),
            round: Vec::new(),
            remaining: pending.len(),
            locked: true,
            finished: false,
            message: "Přetáhni předměty na správná místa!",
            pending,
            items_per_round: items_per_round.max(1),
            rules,
            rng: rng_from(seed),
        }
    }

    pub fn round(&self) -> &[DragDropItem] {
        &self.round
    }

    pub fn zones(&self) -> &[DropZone] {
        &self.zones
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn load_round(&mut self, host: &mut dyn GameHost) {
        if self.pending.is_empty() {
            self.locked = true;
            self.message = "🎊 Level dokončen!";
            host.play(Cue::Correct);
            host.schedule(self.rules.timing.short_ms, GameTimer::Complete);
            return;
        }
        self.pending.shuffle(&mut self.rng);
        let take = self.items_per_round.min(self.pending.len());
        self.round = self.pending.drain(..take).collect();
        self.locked = false;
        self.message = "Přetáhni předměty na správná místa!";
    }

    fn drop_item(&mut self, host: &mut dyn GameHost, item: usize, destination: usize) -> bool {
        if self.locked || self.finished {
            return false;
        }
        let (Some(&dragged), Some(zone)) = (self.round.get(item), self.zones.get_mut(destination)) else {
            return false;
        };

        if zone.destination.name == dragged.belongs_to {
            zone.dropped.push(dragged.item.emoji);
            self.round.remove(item);
            self.remaining -= 1;
            self.message = "🎉 Správně! +10 bodů";
            host.add_score(self.rules.scoring.correct);
            host.play(Cue::Correct);
            if self.round.is_empty() {
                self.locked = true;
                host.schedule(self.rules.timing.feedback_ms, GameTimer::NextRound);
            }
        } else {
            self.message = "❌ Špatně! Zkus jiné místo. -5 bodů";
            host.subtract_score(self.rules.scoring.penalty);
            host.play(Cue::Error);
        }
        true
    }
}

impl Game for DragDropGame {
    fn start(&mut self, host: &mut dyn GameHost) {
        self.load_round(host);
    }

    fn input(&mut self, host: &mut dyn GameHost, input: PlayerInput) -> bool {
        match input {
            // Picking an item up says its name.
            PlayerInput::Pick { index } => match self.round.get(index) {
                Some(item) if !self.locked => {
                    host.speak(item.item.name);
                    true
                }
                _ => false,
            },
            PlayerInput::Drop { item, destination } => self.drop_item(host, item, destination),
            _ => false,
        }
    }

    fn on_timer(&mut self, host: &mut dyn GameHost, timer: GameTimer) {
        match timer {
            GameTimer::NextRound => self.load_round(host),
            GameTimer::Complete => {
                self.finished = true;
                host.complete_level();
            }
            _ => {}
        }
    }
}
