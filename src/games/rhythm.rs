//! Rhythm: listen to a word sequence, then repeat it in order.

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;

use super::{Game, GameHost, GameTimer, PlayerInput, rng_from};
use crate::config::GameRules;
use crate::difficulty::Difficulty;
use crate::feedback::Cue;
use crate::levels::{Level, LevelItem, standard_items};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RhythmGame {
    /// Words on the table: the sequence plus distractors, shuffled.
    choices: Vec<LevelItem>,
    answer: Vec<LevelItem>,
    sequence_len: usize,
    playing: Option<usize>,
    rounds_done: u32,
    rounds_required: u32,
    play_enabled: bool,
    can_input: bool,
    finished: bool,
    message: &'static str,
    #[serde(skip)]
    pool: Vec<LevelItem>,
    #[serde(skip)]
    sequence: Vec<LevelItem>,
    #[serde(skip)]
    distractors: usize,
    #[serde(skip)]
    rules: GameRules,
    #[serde(skip)]
    rng: SmallRng,
}

impl RhythmGame {
    /// Words come from the standard levels before `level_index`.
    pub fn new(levels: &[Level], level_index: usize, difficulty: Difficulty, rules: GameRules, seed: u64) -> Self {
        let pool = match level_index.checked_sub(1) {
            Some(last) => standard_items(levels, 0..=last, difficulty),
            None => Vec::new(),
        };
        let mut game = Self {
            choices: Vec::new(),
            answer: Vec::new(),
            sequence_len: difficulty.sequence_len(),
            playing: None,
            rounds_done: 0,
            rounds_required: rules.rounds.required,
            play_enabled: false,
            can_input: false,
            finished: pool.is_empty(),
            message: "",
            pool,
            sequence: Vec::new(),
            distractors: difficulty.distractors(),
            rules,
            rng: rng_from(seed),
        };
        if game.finished {
            game.message = "Nejsou žádná slova k procvičení.";
        } else {
            game.load_round();
        }
        game
    }

    pub fn sequence(&self) -> &[LevelItem] {
        &self.sequence
    }

    pub fn choices(&self) -> &[LevelItem] {
        &self.choices
    }

    pub fn answer(&self) -> &[LevelItem] {
        &self.answer
    }

    pub fn can_input(&self) -> bool {
        self.can_input
    }

    fn load_round(&mut self) {
        self.sequence = self
            .pool
            .choose_multiple(&mut self.rng, self.sequence_len)
            .copied()
            .collect();

        let mut names: HashSet<&str> = HashSet::new();
        let mut choices: Vec<LevelItem> = self.sequence.iter().copied().filter(|i| names.insert(i.name)).collect();
        let mut others: Vec<LevelItem> = self.pool.iter().copied().filter(|i| !names.contains(i.name)).collect();
        others.shuffle(&mut self.rng);
        let mut extra_names: HashSet<&str> = HashSet::new();
        choices.extend(
            others
                .into_iter()
                .filter(|i| extra_names.insert(i.name))
                .take(self.distractors),
        );
        choices.shuffle(&mut self.rng);

        self.choices = choices;
        self.answer.clear();
        self.playing = None;
        self.can_input = false;
        self.play_enabled = true;
        self.message = "Klikni na PLAY a poslouchej posloupnost slov!";
    }

    fn play(&mut self, host: &mut dyn GameHost) -> bool {
        if self.finished || !self.play_enabled {
            return false;
        }
        self.play_enabled = false;
        self.message = "Poslouchej pozorně...";
        let step = self.rules.timing.feedback_ms;
        let steps = self.sequence.len() as u32;
        for i in 0..steps {
            host.schedule(i * step, GameTimer::SpeakStep(i as usize));
        }
        host.schedule(steps * step + self.rules.timing.short_ms, GameTimer::EnableInput);
        true
    }

    fn pick(&mut self, index: usize) -> bool {
        if !self.can_input || self.answer.len() >= self.sequence.len() {
            return false;
        }
        let Some(&item) = self.choices.get(index) else { return false };
        self.answer.push(item);
        if self.answer.len() == self.sequence.len() {
            self.message = "Hotovo! Teď klikni na Zkontrolovat.";
        }
        true
    }

    fn remove(&mut self, index: usize) -> bool {
        if !self.can_input || index >= self.answer.len() {
            return false;
        }
        self.answer.remove(index);
        true
    }

    fn submit(&mut self, host: &mut dyn GameHost) -> bool {
        if !self.can_input {
            return false;
        }
        self.can_input = false;
        let correct = self.answer.len() == self.sequence.len()
            && self.answer.iter().zip(&self.sequence).all(|(a, s)| a.name == s.name);

        if correct {
            self.rounds_done += 1;
            self.message = "🎉 Perfektní! +20 bodů";
            host.add_score(self.rules.scoring.correct_double);
            host.play(Cue::Correct);
            if self.rounds_done >= self.rounds_required {
                host.schedule(self.rules.timing.wrong_ms, GameTimer::Complete);
            } else {
                host.schedule(self.rules.timing.transition_ms, GameTimer::NextRound);
            }
        } else {
            self.message = "❌ Špatně! Poslechni si to znovu.";
            self.answer.clear();
            self.play_enabled = true;
            host.subtract_score(self.rules.scoring.penalty);
            host.play(Cue::Error);
        }
        true
    }
}

impl Game for RhythmGame {
    fn start(&mut self, host: &mut dyn GameHost) {
        // Nothing to listen to: let the player move on after the notice.
        if self.pool.is_empty() {
            host.schedule(self.rules.timing.transition_ms, GameTimer::Complete);
        }
    }

    fn input(&mut self, host: &mut dyn GameHost, input: PlayerInput) -> bool {
        match input {
            PlayerInput::Play => self.play(host),
            PlayerInput::Pick { index } => self.pick(index),
            PlayerInput::Remove { index } => self.remove(index),
            PlayerInput::Submit => self.submit(host),
            _ => false,
        }
    }

    fn on_timer(&mut self, host: &mut dyn GameHost, timer: GameTimer) {
        match timer {
            GameTimer::SpeakStep(i) => {
                if let Some(item) = self.sequence.get(i) {
                    self.playing = Some(i);
                    host.speak(item.name);
                }
            }
            GameTimer::EnableInput => {
                self.playing = None;
                self.can_input = true;
                self.message = "Teď klikej na karty a zopakuj posloupnost!";
            }
            GameTimer::NextRound => self.load_round(),
            GameTimer::Complete => {
                self.finished = true;
                self.message = "🎊 Level dokončen!";
                host.complete_level();
            }
            _ => {}
        }
    }
}
