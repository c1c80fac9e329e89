//! Pexeso: find matching pairs among face-down cards.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use serde::Serialize;

use super::{Game, GameHost, GameTimer, PlayerInput, rng_from};
use crate::config::GameRules;
use crate::difficulty::Difficulty;
use crate::feedback::Cue;
use crate::levels::{Level, LevelItem, standard_items};

/// Levels whose words make up the deck.
const SOURCE_LEVELS: std::ops::RangeInclusive<usize> = 0..=4;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryCard {
    #[serde(flatten)]
    pub item: LevelItem,
    pub face_up: bool,
    pub matched: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryGame {
    cards: Vec<MemoryCard>,
    pairs_total: usize,
    pairs_found: usize,
    can_flip: bool,
    finished: bool,
    message: &'static str,
    #[serde(skip)]
    flipped: Vec<usize>,
    #[serde(skip)]
    rules: GameRules,
}

impl MemoryGame {
    pub fn new(levels: &[Level], difficulty: Difficulty, rules: GameRules, seed: u64) -> Self {
        let mut rng = rng_from(seed);
        let mut words = standard_items(levels, SOURCE_LEVELS, difficulty);
        let mut seen = HashSet::new();
        words.retain(|w| seen.insert(w.name));
        words.shuffle(&mut rng);
        words.truncate(rules.rounds.memory_pairs);

        let mut cards: Vec<MemoryCard> = words
            .iter()
            .chain(words.iter())
            .map(|&item| MemoryCard {
                item,
                face_up: false,
                matched: false,
            })
            .collect();
        cards.shuffle(&mut rng);

        Self {
            pairs_total: words.len(),
            pairs_found: 0,
            can_flip: !words.is_empty(),
            finished: words.is_empty(),
            message: if words.is_empty() {
                "Nejsou žádná slova k procvičení."
            } else {
                "Klikni na karty a najdi stejné dvojice!"
            },
            cards,
            flipped: Vec::with_capacity(2),
            rules,
        }
    }

    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    pub fn pairs_total(&self) -> usize {
        self.pairs_total
    }

    pub fn pairs_found(&self) -> usize {
        self.pairs_found
    }

    fn flip(&mut self, host: &mut dyn GameHost, index: usize) -> bool {
        if !self.can_flip || self.finished {
            return false;
        }
        let Some(card) = self.cards.get_mut(index) else { return false };
        if card.face_up || card.matched {
            return false;
        }
        card.face_up = true;
        host.speak(card.item.name);
        self.flipped.push(index);

        if let &[a, b] = self.flipped.as_slice() {
            self.can_flip = false;
            if self.cards[a].item.name == self.cards[b].item.name {
                host.schedule(self.rules.timing.short_ms, GameTimer::ConfirmMatch);
            } else {
                self.message = "❌ Neshodují se, zkus znovu!";
                host.play(Cue::Error);
                host.schedule(self.rules.timing.wrong_ms, GameTimer::FlipBack);
            }
        }
        true
    }
}

impl Game for MemoryGame {
    fn start(&mut self, host: &mut dyn GameHost) {
        if self.pairs_total == 0 {
            host.schedule(self.rules.timing.transition_ms, GameTimer::Complete);
        }
    }

    fn input(&mut self, host: &mut dyn GameHost, input: PlayerInput) -> bool {
        match input {
            PlayerInput::Pick { index } => self.flip(host, index),
            _ => false,
        }
    }

    fn on_timer(&mut self, host: &mut dyn GameHost, timer: GameTimer) {
        match timer {
            GameTimer::ConfirmMatch => {
                for i in self.flipped.drain(..) {
                    self.cards[i].face_up = false;
                    self.cards[i].matched = true;
                }
                self.pairs_found += 1;
                self.message = "🎉 Skvělé! Našel jsi pár! +20 bodů";
                host.add_score(self.rules.scoring.correct_double);
                host.play(Cue::Correct);
                if self.pairs_found == self.pairs_total {
                    host.schedule(self.rules.timing.feedback_ms, GameTimer::Complete);
                } else {
                    self.can_flip = true;
                }
            }
            GameTimer::FlipBack => {
                for i in self.flipped.drain(..) {
                    self.cards[i].face_up = false;
                }
                self.message = "Klikni na karty a najdi stejné dvojice!";
                self.can_flip = true;
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
    use crate::levels::{Level, LevelContent, levels};

    fn game() -> MemoryGame {
        MemoryGame::new(levels(), Difficulty::Hard, GameRules::default(), 21)
    }

    fn partner(g: &MemoryGame, i: usize) -> usize {
        let name = g.cards()[i].item.name;
        (0..g.cards().len())
            .find(|&j| j != i && g.cards()[j].item.name == name)
            .unwrap()
    }

    #[test]
    fn deck_holds_each_word_twice() {
        let g = game();
        assert_eq!(g.pairs_total(), 8);
        assert_eq!(g.cards().len(), 16);
        for i in 0..g.cards().len() {
            partner(&g, i);
        }
    }

    #[test]
    fn empty_deck_still_completes() {
        let only_games = [Level::new("memory", LevelContent::Memory)];
        let mut g = MemoryGame::new(&only_games, Difficulty::Easy, GameRules::default(), 3);
        let mut host = ScriptHost::default();
        assert!(g.cards().is_empty());
        g.start(&mut host);
        assert!(!g.input(&mut host, PlayerInput::Pick { index: 0 }));
        host.run_timers(&mut g);
        assert_eq!(host.completed, 1);
    }

    #[test]
    fn mismatch_flips_back() {
        let mut g = game();
        let mut host = ScriptHost::default();
        let other = (1..g.cards().len())
            .find(|&j| g.cards()[j].item.name != g.cards()[0].item.name)
            .unwrap();
        assert!(g.input(&mut host, PlayerInput::Pick { index: 0 }));
        assert!(g.input(&mut host, PlayerInput::Pick { index: other }));
        // Third card while two are showing is refused.
        assert!(!g.input(&mut host, PlayerInput::Pick { index: partner(&g, 0) }));
        assert_eq!(host.last_cue(), Some(Cue::Error));
        host.run_timers(&mut g);
        assert!(g.cards().iter().all(|c| !c.face_up));
        assert_eq!(host.score, 0);
    }

    #[test]
    fn clearing_the_board_completes() {
        let mut g = game();
        let mut host = ScriptHost::default();
        while g.pairs_found() < g.pairs_total() {
            let first = g.cards().iter().position(|c| !c.matched).unwrap();
            let second = partner(&g, first);
            assert!(g.input(&mut host, PlayerInput::Pick { index: first }));
            assert!(g.input(&mut host, PlayerInput::Pick { index: second }));
            host.run_timers(&mut g);
        }
        assert_eq!(host.completed, 1);
        assert_eq!(host.score, 8 * 20);
        assert!(!g.input(&mut host, PlayerInput::Pick { index: 0 }));
    }
}
