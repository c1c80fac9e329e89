//! Flashcards: hear a word, click its picture.

use rand::Rng;
use rand::rngs::SmallRng;
use serde::Serialize;

use super::{Card, CardState, Game, GameHost, GameTimer, PlayerInput, rng_from, settle_cards};
use crate::config::GameRules;
use crate::difficulty::{Difficulty, items_for_level};
use crate::feedback::Cue;
use crate::levels::LevelItem;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardGame {
    cards: Vec<Card>,
    can_click: bool,
    play_enabled: bool,
    finished: bool,
    message: &'static str,
    /// Cards not found yet, as indices into `cards`.
    #[serde(skip)]
    remaining: Vec<usize>,
    #[serde(skip)]
    target: Option<usize>,
    #[serde(skip)]
    rules: GameRules,
    #[serde(skip)]
    rng: SmallRng,
}

impl StandardGame {
    pub fn new(
        items: &[LevelItem],
        max_display: usize,
        difficulty: Difficulty,
        rules: GameRules,
        seed: u64,
    ) -> Self {
        let mut rng = rng_from(seed);
        let cards: Vec<Card> = items_for_level(items, max_display, difficulty, &mut rng)
            .into_iter()
            .map(Card::new)
            .collect();
        Self {
            remaining: (0..cards.len()).collect(),
            cards,
            can_click: false,
            play_enabled: true,
            finished: false,
            message: "",
            target: None,
            rules,
            rng,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Word currently asked for.
    pub fn target(&self) -> Option<LevelItem> {
        self.target.map(|i| self.cards[i].item)
    }

    fn play(&mut self, host: &mut dyn GameHost) -> bool {
        if self.finished || !self.play_enabled || self.remaining.is_empty() {
            return false;
        }
        for card in self.cards.iter_mut().filter(|c| c.state != CardState::Hidden) {
            card.state = CardState::Clickable;
        }
        let target = self.remaining[self.rng.random_range(0..self.remaining.len())];
        self.target = Some(target);
        self.can_click = true;
        self.play_enabled = false;
        self.message = "Klikni na správnou položku!";
        host.speak(self.cards[target].item.name);
        true
    }

    fn pick(&mut self, host: &mut dyn GameHost, index: usize) -> bool {
        let Some(target) = self.target else { return false };
        if !self.can_click || self.cards.get(index).is_none_or(|c| c.state == CardState::Hidden) {
            return false;
        }
        self.can_click = false;
        settle_cards(&mut self.cards);

        if index == target {
            self.cards[index].state = CardState::Correct;
            self.remaining.retain(|&i| i != index);
            self.target = None;
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
}

impl Game for StandardGame {
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
                if self.remaining.is_empty() {
                    host.schedule(self.rules.timing.feedback_ms, GameTimer::Complete);
                } else {
                    self.play_enabled = true;
                }
            }
            GameTimer::ResetCard(i) => {
                if let Some(card) = self.cards.get_mut(i).filter(|c| c.state == CardState::Wrong) {
                    card.state = CardState::Idle;
                }
                self.play_enabled = true;
            }
            GameTimer::Complete => {
                self.finished = true;
                self.message = "🎊 Level dokončen!";
                host.complete_level();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::test_host::ScriptHost;
    use crate::levels::{LEVELS, levels};

    fn game() -> StandardGame {
        let items = levels()[0].standard_items();
        StandardGame::new(items, 6, Difficulty::Easy, GameRules::default(), 42)
    }

    fn target_index(game: &StandardGame) -> usize {
        let target = game.target().unwrap();
        game.cards().iter().position(|c| c.item == target).unwrap()
    }

    #[test]
    fn easy_shows_at_most_three_cards() {
        assert!(!LEVELS[0].standard_items().is_empty());
        let g = game();
        assert!(!g.cards().is_empty() && g.cards().len() <= 3);
        assert_eq!(g.remaining(), g.cards().len());
    }

    #[test]
    fn pick_before_play_is_ignored() {
        let mut g = game();
        let mut host = ScriptHost::default();
        assert!(!g.input(&mut host, PlayerInput::Pick { index: 0 }));
        assert_eq!(host.score, 0);
    }

    #[test]
    fn correct_pick_scores_and_locks_input() {
        let mut g = game();
        let mut host = ScriptHost::default();
        assert!(g.input(&mut host, PlayerInput::Play));
        assert_eq!(host.spoken.len(), 1);
        let t = target_index(&g);
        assert!(g.input(&mut host, PlayerInput::Pick { index: t }));
        assert_eq!(host.score, 10);
        assert_eq!(host.last_cue(), Some(Cue::Correct));
        // Second click on the same answer is swallowed.
        assert!(!g.input(&mut host, PlayerInput::Pick { index: t }));
        assert!(!g.input(&mut host, PlayerInput::Play));
        assert_eq!(host.timers, vec![(1000, GameTimer::HideCard(t))]);
    }

    #[test]
    fn wrong_pick_penalizes_then_reenables() {
        let mut g = game();
        let mut host = ScriptHost::default();
        g.input(&mut host, PlayerInput::Play);
        let t = target_index(&g);
        let wrong = (t + 1) % g.cards().len();
        assert!(g.input(&mut host, PlayerInput::Pick { index: wrong }));
        assert_eq!(host.score, -5);
        assert_eq!(g.cards()[wrong].state, CardState::Wrong);
        host.run_timers(&mut g);
        assert_eq!(g.cards()[wrong].state, CardState::Idle);
        assert!(g.input(&mut host, PlayerInput::Play));
    }

    #[test]
    fn finding_every_card_completes_once() {
        let mut g = game();
        let mut host = ScriptHost::default();
        let total = g.cards().len();
        for _ in 0..total {
            assert!(g.input(&mut host, PlayerInput::Play));
            let t = target_index(&g);
            g.input(&mut host, PlayerInput::Pick { index: t });
            host.run_timers(&mut g);
        }
        assert_eq!(host.completed, 1);
        assert_eq!(host.score, 10 * total as i64);
        assert!(g.cards().iter().all(|c| c.state == CardState::Hidden));
        assert!(!g.input(&mut host, PlayerInput::Play));
    }
}
