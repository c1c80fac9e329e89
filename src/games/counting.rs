//! Counting: how many of one object are hidden in the crowd?

use std::ops::RangeInclusive;

use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;

use super::{Game, GameHost, GameTimer, PlayerInput, rng_from};
use crate::config::GameRules;
use crate::difficulty::{Difficulty, filter_by_difficulty};
use crate::feedback::Cue;
use crate::levels::CountingObject;

const MAX_COUNT: usize = 9;
const CROWD: RangeInclusive<usize> = 15..=20;
/// Wrong options stay within this distance of the answer.
const SPREAD: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerState {
    #[default]
    Idle,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub value: usize,
    pub state: AnswerState,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountingGame {
    question: String,
    crowd: Vec<&'static str>,
    options: Vec<AnswerOption>,
    rounds_done: u32,
    rounds_required: u32,
    disabled: bool,
    finished: bool,
    message: String,
    #[serde(skip)]
    objects: Vec<CountingObject>,
    #[serde(skip)]
    target: Option<CountingObject>,
    #[serde(skip)]
    answer: usize,
    #[serde(skip)]
    option_count: usize,
    #[serde(skip)]
    rules: GameRules,
    #[serde(skip)]
    rng: SmallRng,
}

/// Candidate answers: `answer` plus up to `count - 1` distinct values near it.
fn answer_options<R: Rng + ?Sized>(answer: usize, count: usize, rng: &mut R) -> Vec<usize> {
    let low = answer.saturating_sub(SPREAD);
    let high = (answer + SPREAD).min(MAX_COUNT);
    let mut near: Vec<usize> = (low..=high).filter(|&v| v != answer).collect();
    near.shuffle(rng);
    near.truncate(count.saturating_sub(1));
    near.push(answer);
    near.shuffle(rng);
    near
}

impl CountingGame {
    pub fn new(objects: &[CountingObject], difficulty: Difficulty, rules: GameRules, seed: u64) -> Self {
        let mut filtered = filter_by_difficulty(objects, difficulty);
        if filtered.len() < 2 {
            filtered = objects.to_vec();
        }
        let mut game = Self {
            question: String::new(),
            crowd: Vec::new(),
            options: Vec::new(),
            rounds_done: 0,
            rounds_required: rules.rounds.required,
            disabled: true,
            finished: filtered.is_empty(),
            message: String::new(),
            objects: filtered,
            target: None,
            answer: 0,
            option_count: difficulty.counting_options(),
            rules,
            rng: rng_from(seed),
        };
        game.load_round();
        game
    }

    pub fn answer(&self) -> usize {
        self.answer
    }

    pub fn target(&self) -> Option<CountingObject> {
        self.target
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn crowd(&self) -> &[&'static str] {
        &self.crowd
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    fn load_round(&mut self) {
        let Some(&target) = self.objects.choose(&mut self.rng) else { return };
        let answer = self.rng.random_range(0..=MAX_COUNT);
        let total = self.rng.random_range(CROWD);

        let others: Vec<&'static str> = self
            .objects
            .iter()
            .filter(|o| o.name != target.name)
            .map(|o| o.emoji)
            .collect();
        let mut crowd = vec![target.emoji; answer];
        if !others.is_empty() {
            for _ in answer..total {
                crowd.push(others[self.rng.random_range(0..others.len())]);
            }
        }
        crowd.shuffle(&mut self.rng);

        let name = if answer == 1 { target.name_singular } else { target.name };
        self.question = format!("How many {name} can you see?");
        self.target = Some(target);
        self.crowd = crowd;
        self.answer = answer;
        self.options = answer_options(answer, self.option_count, &mut self.rng)
            .into_iter()
            .map(|value| AnswerOption {
                value,
                state: AnswerState::Idle,
            })
            .collect();
        self.message.clear();
        self.disabled = false;
    }

    fn answer_with(&mut self, host: &mut dyn GameHost, index: usize) -> bool {
        if self.disabled || self.finished || index >= self.options.len() {
            return false;
        }
        self.disabled = true;
        let timing = self.rules.timing;

        if self.options[index].value == self.answer {
            self.options[index].state = AnswerState::Correct;
            self.rounds_done += 1;
            host.add_score(self.rules.scoring.correct);
            host.play(Cue::Correct);
            host.speak(&self.answer.to_string());
            if self.rounds_done >= self.rounds_required {
                self.message = "🎊 Level dokončen! +10 bodů".to_string();
                host.schedule(timing.wrong_ms, GameTimer::Complete);
            } else {
                let left = self.rounds_required - self.rounds_done;
                let word = if left == 1 { "kolo" } else { "kola" };
                self.message = format!("🎉 Správně! +10 bodů (Zbývá {left} {word})");
                host.schedule(timing.transition_ms, GameTimer::NextRound);
            }
        } else {
            self.options[index].state = AnswerState::Incorrect;
            let answer = self.answer;
            if let Some(right) = self.options.iter_mut().find(|o| o.value == answer) {
                right.state = AnswerState::Correct;
            }
            self.message = format!("❌ Špatně! Správná odpověď je {answer}. -5 bodů");
            host.subtract_score(self.rules.scoring.penalty);
            host.play(Cue::Error);
            host.schedule(timing.wrong_long_ms, GameTimer::NextRound);
        }
        true
    }
}

impl Game for CountingGame {
    fn start(&mut self, host: &mut dyn GameHost) {
        host.schedule(self.rules.timing.short_ms, GameTimer::AskQuestion);
    }

    fn input(&mut self, host: &mut dyn GameHost, input: PlayerInput) -> bool {
        match input {
            PlayerInput::Pick { index } => self.answer_with(host, index),
            _ => false,
        }
    }

    fn on_timer(&mut self, host: &mut dyn GameHost, timer: GameTimer) {
        match timer {
            GameTimer::AskQuestion => host.speak(&self.question),
            GameTimer::NextRound => {
                self.load_round();
                host.schedule(self.rules.timing.short_ms, GameTimer::AskQuestion);
            }
            GameTimer::Complete => {
                self.finished = true;
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
    use crate::levels::{LevelContent, levels};

    fn objects() -> &'static [CountingObject] {
        levels()
            .iter()
            .find_map(|l| match l.content {
                LevelContent::Counting { objects } => Some(objects),
                _ => None,
            })
            .unwrap()
    }

    fn correct_option(g: &CountingGame) -> usize {
        g.options().iter().position(|o| o.value == g.answer()).unwrap()
    }

    #[test]
    fn options_stay_near_and_contain_answer() {
        let mut rng = rng_from(5);
        for answer in 0..=MAX_COUNT {
            for want in [3, 4, 6] {
                let opts = answer_options(answer, want, &mut rng);
                assert!(opts.contains(&answer));
                assert!(opts.len() <= want);
                assert!(opts.iter().all(|&v| v <= MAX_COUNT && v.abs_diff(answer) <= SPREAD));
                let mut dedup = opts.clone();
                dedup.sort_unstable();
                dedup.dedup();
                assert_eq!(dedup.len(), opts.len());
            }
        }
        // Edges cannot offer more than four distinct values.
        assert_eq!(answer_options(0, 6, &mut rng).len(), 4);
        assert_eq!(answer_options(5, 6, &mut rng).len(), 6);
    }

    #[test]
    fn crowd_holds_exactly_the_answer() {
        let g = CountingGame::new(objects(), Difficulty::Medium, GameRules::default(), 8);
        let target = g.target().unwrap();
        assert!(g.question().contains(target.name_singular));
        let target_emoji = target.emoji;
        let seen = g.crowd().iter().filter(|&&e| e == target_emoji).count();
        assert_eq!(seen, g.answer());
        assert!(CROWD.contains(&g.crowd().len()));
    }

    #[test]
    fn three_right_answers_complete() {
        let mut g = CountingGame::new(objects(), Difficulty::Easy, GameRules::default(), 13);
        let mut host = ScriptHost::default();
        g.start(&mut host);
        for _ in 0..3 {
            let i = correct_option(&g);
            assert!(g.input(&mut host, PlayerInput::Pick { index: i }));
            assert!(!g.input(&mut host, PlayerInput::Pick { index: i }));
            host.run_timers(&mut g);
        }
        assert_eq!(host.completed, 1);
        assert_eq!(host.score, 30);
        assert!(host.spoken.iter().any(|s| s.starts_with("How many")));
    }

    #[test]
    fn wrong_answer_reveals_and_moves_on() {
        let mut g = CountingGame::new(objects(), Difficulty::Hard, GameRules::default(), 2);
        let mut host = ScriptHost::default();
        let wrong = (correct_option(&g) + 1) % g.options().len();
        assert!(g.input(&mut host, PlayerInput::Pick { index: wrong }));
        assert_eq!(g.options()[wrong].state, AnswerState::Incorrect);
        assert_eq!(g.options()[correct_option(&g)].state, AnswerState::Correct);
        assert_eq!(host.timers, vec![(2500, GameTimer::NextRound)]);
        assert_eq!(host.score, -5);
    }
}
