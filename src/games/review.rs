//! Review rounds: two cards, one spoken word.
//!
//! Practice draws from every completed standard level and ends back on the
//! map. Auto review draws from a fixed level range and completes its own level.

use std::collections::BTreeSet;

use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;

use super::{Card, CardState, Game, GameHost, GameTimer, PlayerInput, rng_from, settle_cards};
use crate::config::GameRules;
use crate::difficulty::{Difficulty, filter_by_difficulty};
use crate::feedback::Cue;
use crate::levels::{Level, LevelItem, standard_items};
use crate::route::ReviewMode;

const CARDS_PER_ROUND: usize = 2;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewGame {
    mode: ReviewMode,
    cards: Vec<Card>,
    rounds_done: u32,
    rounds_required: u32,
    can_click: bool,
    play_enabled: bool,
    finished: bool,
    message: &'static str,
    #[serde(skip)]
    pool: Vec<LevelItem>,
    #[serde(skip)]
    target: Option<LevelItem>,
    #[serde(skip)]
    rules: GameRules,
    #[serde(skip)]
    rng: SmallRng,
}

/// Words a review in `mode` draws from.
pub fn review_pool(
    levels: &[Level],
    mode: ReviewMode,
    completed: &BTreeSet<usize>,
    difficulty: Difficulty,
) -> Vec<LevelItem> {
    match mode {
        ReviewMode::Auto { start, end, .. } => standard_items(levels, start..=end, difficulty),
        ReviewMode::Practice => completed
            .iter()
            .filter_map(|&i| levels.get(i))
            .flat_map(|level| filter_by_difficulty(level.standard_items(), difficulty))
            .collect(),
    }
}

impl ReviewGame {
    pub fn new(
        levels: &[Level],
        mode: ReviewMode,
        completed: &BTreeSet<usize>,
        difficulty: Difficulty,
        rules: GameRules,
        seed: u64,
    ) -> Self {
        let mut game = Self {
            mode,
            cards: Vec::new(),
            rounds_done: 0,
            rounds_required: rules.rounds.review,
            can_click: false,
            play_enabled: false,
            finished: false,
            message: "",
            pool: review_pool(levels, mode, completed, difficulty),
            target: None,
            rules,
            rng: rng_from(seed),
        };
        if game.pool.len() < CARDS_PER_ROUND {
            game.finished = true;
            game.message = "Nedostatek položek k opakování.";
        } else {
            game.init_round();
        }
        game
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn target(&self) -> Option<LevelItem> {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn rounds_done(&self) -> u32 {
        self.rounds_done
    }

    fn init_round(&mut self) {
        let mut picked: Vec<LevelItem> = self
            .pool
            .choose_multiple(&mut self.rng, CARDS_PER_ROUND)
            .copied()
            .collect();
        self.target = picked.first().copied();
        picked.shuffle(&mut self.rng);
        self.cards = picked.into_iter().map(Card::new).collect();
        self.can_click = false;
        self.play_enabled = true;
        self.message = "";
    }

    fn play(&mut self, host: &mut dyn GameHost) -> bool {
        let Some(target) = self.target else { return false };
        if self.finished || !self.play_enabled {
            return false;
        }
        self.can_click = true;
        self.play_enabled = false;
        self.message = "Klikni na správnou položku!";
        for card in &mut self.cards {
            card.state = CardState::Clickable;
        }
        host.speak(target.name);
        true
    }

    fn pick(&mut self, host: &mut dyn GameHost, index: usize) -> bool {
        let Some(target) = self.target else { return false };
        if !self.can_click || self.finished || index >= self.cards.len() {
            return false;
        }
        self.can_click = false;
        settle_cards(&mut self.cards);

        if self.cards[index].item == target {
            self.cards[index].state = CardState::Correct;
            self.rounds_done += 1;
            self.message = "🎉 Správně! +10 bodů";
            host.add_score(self.rules.scoring.correct);
            host.play(Cue::Correct);
            host.schedule(self.rules.timing.feedback_ms, GameTimer::HideCard(index));
        } else {
            self.cards[index].state = CardState::Wrong;
            self.message = "❌ Špatně! -5 bodů. Zkus to znovu.";
            host.subtract_score(self.rules.scoring.penalty);
            host.play(Cue::Error);
            host.schedule(self.rules.timing.wrong_ms, GameTimer::ResetCard(index));
        }
        true
    }

    fn finish(&mut self, host: &mut dyn GameHost) {
        self.finished = true;
        self.message = "🎊 Opakování dokončeno!";
        match self.mode {
            ReviewMode::Auto { .. } => host.complete_level(),
            ReviewMode::Practice => host.schedule(self.rules.timing.transition_ms, GameTimer::LeaveToMap),
        }
    }
}

impl Game for ReviewGame {
    fn input(&mut self, host: &mut dyn GameHost, input: PlayerInput) -> bool {
        match input {
            PlayerInput::Play => self.play(host),
            PlayerInput::Pick { index } => self.pick(host, index),
            _ => false,
        }
    }

    fn on_timer(&mut self, host: &mut dyn GameHost, timer: GameTimer) {
        match timer {
            GameTimer::HideCard(i) => {
                if let Some(card) = self.cards.get_mut(i) {
                    card.state = CardState::Hidden;
                }
                host.schedule(self.rules.timing.feedback_ms, GameTimer::NextRound);
            }
            GameTimer::NextRound => {
                if self.rounds_done >= self.rounds_required {
                    self.finish(host);
                } else {
                    self.init_round();
                }
            }
            GameTimer::ResetCard(i) => {
                if let Some(card) = self.cards.get_mut(i).filter(|c| c.state == CardState::Wrong) {
                    card.state = CardState::Idle;
                }
                self.play_enabled = true;
            }
            GameTimer::LeaveToMap => host.return_to_map(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::test_host::ScriptHost;
    use crate::levels::levels;

    fn correct_index(game: &ReviewGame) -> usize {
        let target = game.target().unwrap();
        game.cards().iter().position(|c| c.item == target).unwrap()
    }

    fn win_round(game: &mut ReviewGame, host: &mut ScriptHost) {
        assert!(game.input(host, PlayerInput::Play));
        let i = correct_index(game);
        assert!(game.input(host, PlayerInput::Pick { index: i }));
        host.run_timers(game);
    }

    #[test]
    fn practice_without_completed_levels_finishes_immediately() {
        let g = ReviewGame::new(
            levels(),
            ReviewMode::Practice,
            &BTreeSet::new(),
            Difficulty::Easy,
            GameRules::default(),
            1,
        );
        assert!(g.is_finished());
        assert!(g.cards().is_empty());
    }

    #[test]
    fn target_is_always_on_the_table() {
        let mode = ReviewMode::Auto { start: 0, end: 3, level_index: 4 };
        let g = ReviewGame::new(levels(), mode, &BTreeSet::new(), Difficulty::Hard, GameRules::default(), 9);
        assert_eq!(g.cards().len(), 2);
        assert!(g.cards().iter().any(|c| Some(c.item) == g.target()));
    }

    #[test]
    fn auto_review_completes_after_five_rounds() {
        let mode = ReviewMode::Auto { start: 0, end: 3, level_index: 4 };
        let mut g = ReviewGame::new(levels(), mode, &BTreeSet::new(), Difficulty::Medium, GameRules::default(), 3);
        let mut host = ScriptHost::default();
        for _ in 0..5 {
            win_round(&mut g, &mut host);
        }
        assert!(g.is_finished());
        assert_eq!(host.completed, 1);
        assert_eq!(host.score, 50);
        assert!(!host.left_to_map);
    }

    #[test]
    fn practice_returns_to_map_without_completing() {
        let completed: BTreeSet<usize> = [0, 1].into_iter().collect();
        let mut g = ReviewGame::new(levels(), ReviewMode::Practice, &completed, Difficulty::Easy, GameRules::default(), 5);
        let mut host = ScriptHost::default();
        for _ in 0..5 {
            win_round(&mut g, &mut host);
        }
        assert_eq!(host.completed, 0);
        assert!(host.left_to_map);
    }

    #[test]
    fn wrong_pick_keeps_round() {
        let mode = ReviewMode::Auto { start: 6, end: 8, level_index: 9 };
        let mut g = ReviewGame::new(levels(), mode, &BTreeSet::new(), Difficulty::Easy, GameRules::default(), 11);
        let mut host = ScriptHost::default();
        g.input(&mut host, PlayerInput::Play);
        let wrong = 1 - correct_index(&g);
        g.input(&mut host, PlayerInput::Pick { index: wrong });
        assert_eq!(host.score, -5);
        assert_eq!(host.last_cue(), Some(Cue::Error));
        host.run_timers(&mut g);
        assert_eq!(g.rounds_done(), 0);
        assert!(g.input(&mut host, PlayerInput::Play));
    }
}
