//! Mini-game round logic.
//!
//! Each game is a small state machine with no rendering. It reacts to
//! [`PlayerInput`] and to the [`GameTimer`]s it scheduled earlier, and talks to
//! the rest of the app only through [`GameHost`]. Delayed steps go through the
//! host so they share the level's timer scope: leaving the level drops them.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::config::GameRules;
use crate::difficulty::Difficulty;
use crate::feedback::Cue;
use crate::levels::{Level, LevelContent, LevelItem};
use crate::route::ReviewMode;

mod coloring;
mod counting;
mod drag_drop;
mod memory;
mod restaurant;
mod review;
mod rhythm;
mod standard;

pub use coloring::ColoringGame;
pub use counting::CountingGame;
pub use drag_drop::DragDropGame;
pub use memory::MemoryGame;
pub use restaurant::RestaurantGame;
pub use review::ReviewGame;
pub use rhythm::RhythmGame;
pub use standard::StandardGame;

/// Everything a game may do outside its own state.
pub trait GameHost {
    fn add_score(&mut self, amount: u32);
    fn subtract_score(&mut self, amount: u32);
    fn play(&mut self, cue: Cue);
    fn speak(&mut self, text: &str);
    /// Deliver `timer` back to the game after `delay_ms`.
    fn schedule(&mut self, delay_ms: u32, timer: GameTimer);
    /// The level being played is finished.
    fn complete_level(&mut self);
    /// Leave without completing anything (end of free practice).
    fn return_to_map(&mut self);
}

/// Delayed steps, delivered through [`MiniGame::on_timer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameTimer {
    HideCard(usize),
    ResetCard(usize),
    ReenablePlay,
    NextRound,
    ConfirmMatch,
    FlipBack,
    AskQuestion,
    SpeakStep(usize),
    EnableInput,
    Complete,
    LeaveToMap,
}

/// Input from the page. Indices refer to the lists in the game's serialized state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum PlayerInput {
    Play,
    Pick { index: usize },
    PickColor { index: usize },
    Remove { index: usize },
    Submit,
    Drop { item: usize, destination: usize },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    #[default]
    Idle,
    Clickable,
    Correct,
    Wrong,
    Hidden,
}

/// A word card on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    #[serde(flatten)]
    pub item: LevelItem,
    pub state: CardState,
}

impl Card {
    pub fn new(item: LevelItem) -> Self {
        Self {
            item,
            state: CardState::Idle,
        }
    }
}

/// Every clickable card goes back to idle.
fn settle_cards(cards: &mut [Card]) {
    for card in cards.iter_mut().filter(|c| c.state == CardState::Clickable) {
        card.state = CardState::Idle;
    }
}

/// Shared shape of every game.
pub(crate) trait Game {
    /// Called once right after the game is mounted.
    fn start(&mut self, _host: &mut dyn GameHost) {}
    /// Returns `false` when the input was ignored.
    fn input(&mut self, host: &mut dyn GameHost, input: PlayerInput) -> bool;
    fn on_timer(&mut self, host: &mut dyn GameHost, timer: GameTimer);
}

pub(crate) fn rng_from(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

#[derive(Serialize)]
#[serde(tag = "game", rename_all = "camelCase")]
pub enum MiniGame {
    Standard(StandardGame),
    Review(ReviewGame),
    Memory(MemoryGame),
    Counting(CountingGame),
    Rhythm(RhythmGame),
    Restaurant(RestaurantGame),
    DragDrop(DragDropGame),
    Coloring(ColoringGame),
}

macro_rules! dispatch {
    ($self:ident, $g:ident => $body:expr) => {
        match $self {
            MiniGame::Standard($g) => $body,
            MiniGame::Review($g) => $body,
            MiniGame::Memory($g) => $body,
            MiniGame::Counting($g) => $body,
            MiniGame::Rhythm($g) => $body,
            MiniGame::Restaurant($g) => $body,
            MiniGame::DragDrop($g) => $body,
            MiniGame::Coloring($g) => $body,
        }
    };
}

impl MiniGame {
    /// Game for the level at `index`. Auto-review levels have no game of their
    /// own (they are played through [`MiniGame::review`]) and yield `None`, as
    /// does an index outside `levels`.
    pub fn for_level(
        levels: &[Level],
        index: usize,
        difficulty: Difficulty,
        rules: GameRules,
        seed: u64,
    ) -> Option<MiniGame> {
        let level = levels.get(index)?;
        let game = match level.content {
            LevelContent::Standard { items, max_display } => {
                MiniGame::Standard(StandardGame::new(items, max_display, difficulty, rules, seed))
            }
            LevelContent::AutoReview { .. } => return None,
            LevelContent::Memory => MiniGame::Memory(MemoryGame::new(levels, difficulty, rules, seed)),
            LevelContent::Counting { objects } => {
                MiniGame::Counting(CountingGame::new(objects, difficulty, rules, seed))
            }
            LevelContent::Rhythm => MiniGame::Rhythm(RhythmGame::new(levels, index, difficulty, rules, seed)),
            LevelContent::Restaurant {
                drinks,
                customers,
                customers_to_serve,
            } => MiniGame::Restaurant(RestaurantGame::new(
                drinks,
                customers,
                customers_to_serve,
                difficulty,
                rules,
                seed,
            )),
            LevelContent::DragDrop {
                destinations,
                items,
                items_per_round,
            } => MiniGame::DragDrop(DragDropGame::new(
                destinations,
                items,
                items_per_round,
                difficulty,
                rules,
                seed,
            )),
            LevelContent::Coloring { colors, shapes } => {
                MiniGame::Coloring(ColoringGame::new(colors, shapes, difficulty, rules, seed))
            }
        };
        Some(game)
    }

    pub fn review(
        levels: &[Level],
        mode: ReviewMode,
        completed: &BTreeSet<usize>,
        difficulty: Difficulty,
        rules: GameRules,
        seed: u64,
    ) -> MiniGame {
        MiniGame::Review(ReviewGame::new(levels, mode, completed, difficulty, rules, seed))
    }

    pub fn start(&mut self, host: &mut dyn GameHost) {
        dispatch!(self, g => g.start(host))
    }

    pub fn input(&mut self, host: &mut dyn GameHost, input: PlayerInput) -> bool {
        let accepted = dispatch!(self, g => g.input(host, input));
        if !accepted {
            log::debug!("input {input:?} ignored");
        }
        accepted
    }

    pub fn on_timer(&mut self, host: &mut dyn GameHost, timer: GameTimer) {
        dispatch!(self, g => g.on_timer(host, timer))
    }
}

#[cfg(test)]
pub(crate) mod test_host {
    use super::*;

    /// Records everything a game asks of its host.
    #[derive(Default)]
    pub struct ScriptHost {
        pub score: i64,
        pub cues: Vec<Cue>,
        pub spoken: Vec<String>,
        pub timers: Vec<(u32, GameTimer)>,
        pub completed: u32,
        pub left_to_map: bool,
    }

    impl GameHost for ScriptHost {
        fn add_score(&mut self, amount: u32) {
            self.score += i64::from(amount);
        }
        fn subtract_score(&mut self, amount: u32) {
            self.score -= i64::from(amount);
        }
        fn play(&mut self, cue: Cue) {
            self.cues.push(cue);
        }
        fn speak(&mut self, text: &str) {
            self.spoken.push(text.to_string());
        }
        fn schedule(&mut self, delay_ms: u32, timer: GameTimer) {
            self.timers.push((delay_ms, timer));
        }
        fn complete_level(&mut self) {
            self.completed += 1;
        }
        fn return_to_map(&mut self) {
            self.left_to_map = true;
        }
    }

    impl ScriptHost {
        /// Remove the pending timer with the shortest delay.
        pub fn next_timer(&mut self) -> Option<(u32, GameTimer)> {
            let pos = self
                .timers
                .iter()
                .enumerate()
                .min_by_key(|(i, (delay, _))| (*delay, *i))
                .map(|(i, _)| i)?;
            Some(self.timers.remove(pos))
        }

        /// Fire pending timers (and those they schedule) until none are left.
        pub fn run_timers<G: Game>(&mut self, game: &mut G) {
            while let Some((_, timer)) = self.next_timer() {
                game.on_timer(self, timer);
            }
        }

        pub fn last_cue(&self) -> Option<Cue> {
            self.cues.last().copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_host::ScriptHost;
    use super::*;
    use crate::levels::levels;

    #[test]
    fn every_catalog_level_but_auto_review_has_a_game() {
        for (index, level) in levels().iter().enumerate() {
            let game = MiniGame::for_level(levels(), index, Difficulty::Easy, GameRules::default(), 7);
            match level.content {
                LevelContent::AutoReview { .. } => assert!(game.is_none()),
                _ => assert!(game.is_some(), "level {index} has no game"),
            }
        }
        assert!(MiniGame::for_level(levels(), levels().len(), Difficulty::Easy, GameRules::default(), 7).is_none());
    }

    #[test]
    fn player_input_json() {
        let pick: PlayerInput = serde_json::from_str(r#"{"action":"pick","index":2}"#).unwrap();
        assert_eq!(pick, PlayerInput::Pick { index: 2 });
        let drop: PlayerInput = serde_json::from_str(r#"{"action":"drop","item":0,"destination":1}"#).unwrap();
        assert_eq!(drop, PlayerInput::Drop { item: 0, destination: 1 });
        assert!(serde_json::from_str::<PlayerInput>(r#"{"action":"dance"}"#).is_err());
    }

    #[test]
    fn state_is_tagged_by_game() {
        let mut game = MiniGame::for_level(levels(), 0, Difficulty::Easy, GameRules::default(), 1).unwrap();
        let mut host = ScriptHost::default();
        game.start(&mut host);
        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(json["game"], "standard");
        assert!(json["cards"].is_array());
    }
}
