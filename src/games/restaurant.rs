//! Restaurant: serve each customer the drink they asked for.

use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;

use super::{Game, GameHost, GameTimer, PlayerInput, rng_from};
use crate::config::GameRules;
use crate::difficulty::{Difficulty, filter_by_difficulty};
use crate::feedback::Cue;
use crate::levels::DrinkItem;

const DEFAULT_CUSTOMER: &str = "🧑";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantGame {
    customer: &'static str,
    order: String,
    drinks: Vec<DrinkItem>,
    served_emoji: Option<&'static str>,
    served: usize,
    customers_to_serve: usize,
    accepting: bool,
    finished: bool,
    message: String,
    #[serde(skip)]
    wanted: Option<DrinkItem>,
    #[serde(skip)]
    customers: &'static [&'static str],
    #[serde(skip)]
    rules: GameRules,
    #[serde(skip)]
    rng: SmallRng,
}

impl RestaurantGame {
    pub fn new(
        drinks: &[DrinkItem],
        customers: &'static [&'static str],
        customers_to_serve: usize,
        difficulty: Difficulty,
        rules: GameRules,
        seed: u64,
    ) -> Self {
        let drinks = filter_by_difficulty(drinks, difficulty);
        let mut game = Self {
            customer: DEFAULT_CUSTOMER,
            order: String::new(),
            finished: drinks.is_empty(),
            drinks,
            served_emoji: None,
            served: 0,
            customers_to_serve,
            accepting: false,
            message: String::new(),
            wanted: None,
            customers,
            rules,
            rng: rng_from(seed),
        };
        game.next_customer();
        game
    }

    pub fn wanted(&self) -> Option<DrinkItem> {
        self.wanted
    }

    pub fn drinks(&self) -> &[DrinkItem] {
        &self.drinks
    }

    pub fn served(&self) -> usize {
        self.served
    }

    fn next_customer(&mut self) {
        let Some(&drink) = self.drinks.choose(&mut self.rng) else { return };
        self.customer = self.customers.choose(&mut self.rng).copied().unwrap_or(DEFAULT_CUSTOMER);
        self.wanted = Some(drink);
        self.order = format!("I want {}", drink.name);
        self.drinks.shuffle(&mut self.rng);
        self.served_emoji = None;
        self.accepting = true;
    }

    fn serve(&mut self, host: &mut dyn GameHost, index: usize) -> bool {
        let Some(wanted) = self.wanted else { return false };
        if !self.accepting || self.finished {
            return false;
        }
        let Some(&drink) = self.drinks.get(index) else { return false };

        if drink.name == wanted.name {
            self.accepting = false;
            self.served += 1;
            self.served_emoji = Some(wanted.emoji);
            self.message = "🎉 Správně! +10 bodů".to_string();
            host.add_score(self.rules.scoring.correct);
            host.play(Cue::Correct);
            host.speak("Thank you!");
            if self.served >= self.customers_to_serve {
                host.schedule(self.rules.timing.wrong_ms, GameTimer::Complete);
            } else {
                host.schedule(self.rules.timing.transition_ms, GameTimer::NextRound);
            }
        } else {
            self.message = format!("❌ Špatně! Zákazník chtěl {}. -5 bodů", wanted.czech);
            host.subtract_score(self.rules.scoring.penalty);
            host.play(Cue::Error);
        }
        true
    }
}

impl Game for RestaurantGame {
    fn start(&mut self, host: &mut dyn GameHost) {
        if self.wanted.is_some() {
            host.schedule(self.rules.timing.short_ms, GameTimer::AskQuestion);
        }
    }

    fn input(&mut self, host: &mut dyn GameHost, input: PlayerInput) -> bool {
        match input {
            PlayerInput::Pick { index } => self.serve(host, index),
            // Replay the order.
            PlayerInput::Play if self.accepting => {
                host.speak(&self.order);
                true
            }
            _ => false,
        }
    }

    fn on_timer(&mut self, host: &mut dyn GameHost, timer: GameTimer) {
        match timer {
            GameTimer::AskQuestion => host.speak(&self.order),
            GameTimer::NextRound => {
                self.next_customer();
                host.schedule(self.rules.timing.short_ms, GameTimer::AskQuestion);
            }
            GameTimer::Complete => {
                self.finished = true;
                self.message = "🎊 Level dokončen!".to_string();
                host.complete_level();
            }
            _ => {}
        }
    }
}
