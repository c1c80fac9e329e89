//! Session glue: routing guards, the active mini-game, level completion and
//! the map view.
//!
//! Delayed work never holds a borrow of the app. A timer posts an event into
//! the inbox and wakes the app, which drains the inbox in [`GameApp::pump`].
//! Events carry the route epoch they were scheduled in; anything left over
//! from a screen the player already left is dropped.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::Serialize;

use crate::completion::{CompletionOrchestrator, CompletionOutcome, PendingReward};
use crate::config::{GameConfig, GameRules};
use crate::difficulty::Difficulty;
use crate::error::GameError;
use crate::feedback::{Cue, FeedbackSink};
use crate::games::{GameHost, GameTimer, MiniGame, PlayerInput};
use crate::grouping::{Reward, calculate_groups, is_level_unlocked};
use crate::levels::{Level, LevelContent, LevelKind};
use crate::progress::{ProgressSnapshot, ProgressStore, SubscriptionId};
use crate::route::{ReviewMode, Route};
use crate::timers::{Scheduler, TimerScope};

#[derive(Clone, Copy, Debug)]
enum AppEvent {
    Game(GameTimer),
    /// The feedback pause after a completion ran out.
    LeaveFinishedLevel,
}

#[derive(Clone, Copy, Debug)]
struct Queued {
    epoch: u64,
    event: AppEvent,
}

type Inbox = Rc<RefCell<VecDeque<Queued>>>;

/// Posts events into the inbox through the current route's timer scope.
struct TimerLink<'h> {
    scope: &'h TimerScope,
    inbox: &'h Inbox,
    wake: &'h Rc<dyn Fn()>,
    epoch: u64,
}

impl TimerLink<'_> {
    fn post(&self, delay_ms: u32, event: AppEvent) {
        let inbox = Rc::downgrade(self.inbox);
        let wake = self.wake.clone();
        let queued = Queued {
            epoch: self.epoch,
            event,
        };
        self.scope.set_timer(delay_ms, move || {
            let Some(inbox) = inbox.upgrade() else { return };
            inbox.borrow_mut().push_back(queued);
            wake();
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Finish {
    Complete,
    ReturnToMap,
}

/// What a running game sees of the app. Level exits are recorded and acted
/// on once the game hands control back.
struct LevelHost<'h> {
    store: &'h mut ProgressStore,
    feedback: &'h dyn FeedbackSink,
    speech_rate: f32,
    timers: TimerLink<'h>,
    finish: Option<Finish>,
}

impl GameHost for LevelHost<'_> {
    fn add_score(&mut self, amount: u32) {
        self.store.add_score(amount);
    }

    fn subtract_score(&mut self, amount: u32) {
        self.store.subtract_score(amount);
    }

    fn play(&mut self, cue: Cue) {
        self.feedback.play(cue);
    }

    fn speak(&mut self, text: &str) {
        self.feedback.speak(text, self.speech_rate);
    }

    fn schedule(&mut self, delay_ms: u32, timer: GameTimer) {
        self.timers.post(delay_ms, AppEvent::Game(timer));
    }

    fn complete_level(&mut self) {
        self.finish.get_or_insert(Finish::Complete);
    }

    fn return_to_map(&mut self) {
        self.finish.get_or_insert(Finish::ReturnToMap);
    }
}

// --- Map view -----------------------------------------------------------------

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelTile {
    pub index: usize,
    pub name: &'static str,
    pub icon: &'static str,
    pub kind: LevelKind,
    pub completed: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    /// 1-based, as shown on the map.
    pub number: usize,
    pub locked: bool,
    pub completed: bool,
    pub reward: Reward,
    pub levels: Vec<LevelTile>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySlot {
    pub group_number: usize,
    pub reward: Reward,
    pub icon: &'static str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub score: u32,
    pub difficulty: Option<Difficulty>,
    pub groups: Vec<GroupView>,
    pub inventory: Vec<InventorySlot>,
    pub scroll_to: Option<usize>,
    /// Reward earned since the map was last shown.
    pub reward: Option<PendingReward>,
    pub can_practice: bool,
}

// --- App ----------------------------------------------------------------------

pub struct GameApp {
    levels: &'static [Level],
    rules: GameRules,
    speech_rate: f32,
    store: ProgressStore,
    orchestrator: CompletionOrchestrator<'static>,
    feedback: Rc<dyn FeedbackSink>,
    scope: TimerScope,
    route: Route,
    game: Option<MiniGame>,
    /// Level credited when the running game reports completion.
    active_level: Option<usize>,
    shown_reward: Option<PendingReward>,
    epoch: u64,
    seed: u64,
    inbox: Inbox,
    wake: Rc<dyn Fn()>,
    route_listeners: Vec<Box<dyn FnMut(&Route)>>,
}

impl GameApp {
    pub fn new(
        levels: &'static [Level],
        config: &GameConfig,
        store: ProgressStore,
        feedback: Rc<dyn FeedbackSink>,
        scheduler: Rc<dyn Scheduler>,
        seed: u64,
    ) -> Self {
        let rules = config.rules();
        Self {
            levels,
            rules,
            speech_rate: config.speech.rate,
            store,
            orchestrator: CompletionOrchestrator::new(levels, rules.timing.transition_ms),
            feedback,
            scope: TimerScope::new(scheduler),
            route: Route::Difficulty,
            game: None,
            active_level: None,
            shown_reward: None,
            epoch: 0,
            seed,
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            wake: Rc::new(|| {}),
            route_listeners: Vec::new(),
        }
    }

    /// Move the app behind a shared handle whose timers pump it directly.
    pub fn into_shared(self) -> Rc<RefCell<GameApp>> {
        let app = Rc::new(RefCell::new(self));
        let weak = Rc::downgrade(&app);
        app.borrow_mut().wake = Rc::new(move || {
            let Some(app) = weak.upgrade() else { return };
            // While the app is busy the event just waits in the inbox.
            if let Ok(mut app) = app.try_borrow_mut() {
                app.pump();
            }
        });
        app
    }

    /// Enter the first screen. A refused target (locked level, nothing to
    /// practice) lands on the map instead.
    pub fn start(&mut self, requested: Route) -> Route {
        match self.navigate(requested) {
            Ok(route) => route,
            Err(err) => {
                log::warn!("cannot open {requested}: {err}, showing the map");
                self.enter(Route::map());
                self.route
            }
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn levels(&self) -> &'static [Level] {
        self.levels
    }

    pub fn progress(&self) -> &ProgressSnapshot {
        self.store.snapshot()
    }

    pub fn score(&self) -> u32 {
        self.store.score()
    }

    pub fn game(&self) -> Option<&MiniGame> {
        self.game.as_ref()
    }

    pub fn subscribe_progress(&mut self, observer: impl FnMut(&ProgressSnapshot) + 'static) -> SubscriptionId {
        self.store.subscribe(observer)
    }

    pub fn on_route_change(&mut self, listener: impl FnMut(&Route) + 'static) {
        self.route_listeners.push(Box::new(listener));
    }

    // --- Navigation -----------------------------------------------------------

    /// Go to `target` after applying the routing guards. Returns where the
    /// player actually ended up.
    pub fn navigate(&mut self, target: Route) -> Result<Route, GameError> {
        let resolved = self.resolve(target)?;
        self.enter(resolved);
        Ok(resolved)
    }

    pub fn open_level(&mut self, index: usize) -> Result<Route, GameError> {
        self.navigate(Route::Level { index })
    }

    pub fn open_practice(&mut self) -> Result<Route, GameError> {
        self.navigate(Route::Review {
            review: ReviewMode::Practice,
        })
    }

    pub fn go_to_map(&mut self) -> Route {
        self.start(Route::map())
    }

    fn resolve(&self, target: Route) -> Result<Route, GameError> {
        if target != Route::Difficulty && self.store.difficulty().is_none() {
            return Ok(Route::Difficulty);
        }
        match target {
            Route::Level { index } => self.level_route(index),
            Route::Review {
                review: ReviewMode::Auto { level_index, .. },
            } => self.level_route(level_index),
            Route::Review {
                review: ReviewMode::Practice,
            } if self.store.completed_levels().is_empty() => Err(GameError::NothingToPractice),
            _ => Ok(target),
        }
    }

    /// Route for playing level `index`: its own game, or the review round of
    /// an auto-review level.
    fn level_route(&self, index: usize) -> Result<Route, GameError> {
        let Some(level) = self.levels.get(index) else {
            log::warn!("level {index} does not exist, showing the map");
            return Ok(Route::map());
        };
        if !is_level_unlocked(self.levels, self.store.completed_levels(), index) {
            return Err(GameError::LevelLocked(index));
        }
        Ok(match level.content {
            LevelContent::AutoReview { range: (start, end) } => Route::Review {
                review: ReviewMode::Auto {
                    start,
                    end,
                    level_index: index,
                },
            },
            _ => Route::Level { index },
        })
    }

    fn enter(&mut self, route: Route) {
        self.scope.cancel_all();
        self.epoch = self.epoch.wrapping_add(1);
        self.orchestrator.cancel_navigation();
        self.game = None;
        self.active_level = None;
        self.shown_reward = None;
        self.route = route;
        log::info!("entering {route}");

        let difficulty = self.store.difficulty();
        match (route, difficulty) {
            (Route::Map { .. }, _) => self.shown_reward = self.orchestrator.consume_pending_reward(),
            (Route::Level { index }, Some(d)) => {
                let seed = self.next_seed();
                self.game = MiniGame::for_level(self.levels, index, d, self.rules, seed);
                self.active_level = Some(index);
            }
            (Route::Review { review }, Some(d)) => {
                let seed = self.next_seed();
                self.game = Some(MiniGame::review(
                    self.levels,
                    review,
                    self.store.completed_levels(),
                    d,
                    self.rules,
                    seed,
                ));
                self.active_level = match review {
                    ReviewMode::Auto { level_index, .. } => Some(level_index),
                    ReviewMode::Practice => None,
                };
            }
            _ => {}
        }

        for listener in &mut self.route_listeners {
            listener(&route);
        }
        self.drive(|game, host| game.start(host));
    }

    fn next_seed(&mut self) -> u64 {
        self.seed = self.seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        self.seed
    }

    // --- Progress -------------------------------------------------------------

    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> Route {
        self.store.set_difficulty(difficulty);
        self.feedback.play(Cue::GameStart);
        log::info!("difficulty set to {difficulty}");
        self.enter(Route::map());
        self.route
    }

    pub fn add_score(&mut self, amount: u32) {
        self.store.add_score(amount);
    }

    pub fn subtract_score(&mut self, amount: u32) {
        self.store.subtract_score(amount);
    }

    /// Record level `index` as finished, play the cue and leave for the next
    /// screen once the feedback pause is over.
    pub fn complete_level(&mut self, index: usize) -> Option<CompletionOutcome> {
        let outcome = self.orchestrator.complete_level(&mut self.store, index)?;
        self.feedback.play(outcome.cue);
        self.timer_link().post(outcome.delay_ms, AppEvent::LeaveFinishedLevel);
        Some(outcome)
    }

    /// One-shot: the reward shown on the map, or one still waiting.
    pub fn consume_pending_reward(&mut self) -> Option<PendingReward> {
        self.shown_reward
            .take()
            .or_else(|| self.orchestrator.consume_pending_reward())
    }

    pub fn reset_all(&mut self) -> Route {
        log::info!("resetting all progress");
        self.store.reset();
        self.orchestrator.clear();
        self.enter(Route::Difficulty);
        self.route
    }

    // --- Games ----------------------------------------------------------------

    /// Forward player input to the running game. `Ok(false)` means the game
    /// ignored it.
    pub fn game_input(&mut self, input: PlayerInput) -> Result<bool, GameError> {
        self.drive(|game, host| game.input(host, input))
            .ok_or(GameError::NotStarted)
    }

    /// Deliver every event posted by fired timers.
    pub fn pump(&mut self) {
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(Queued { epoch, event }) = next else { break };
            if epoch != self.epoch {
                log::debug!("dropping {event:?} from a screen already left");
                continue;
            }
            match event {
                AppEvent::Game(timer) => {
                    self.drive(|game, host| game.on_timer(host, timer));
                }
                AppEvent::LeaveFinishedLevel => {
                    if let Some(route) = self.orchestrator.take_navigation() {
                        self.enter(route);
                    }
                }
            }
        }
    }

    fn timer_link(&self) -> TimerLink<'_> {
        TimerLink {
            scope: &self.scope,
            inbox: &self.inbox,
            wake: &self.wake,
            epoch: self.epoch,
        }
    }

    fn drive<R>(&mut self, f: impl FnOnce(&mut MiniGame, &mut dyn GameHost) -> R) -> Option<R> {
        let game = self.game.as_mut()?;
        let mut host = LevelHost {
            store: &mut self.store,
            feedback: self.feedback.as_ref(),
            speech_rate: self.speech_rate,
            timers: TimerLink {
                scope: &self.scope,
                inbox: &self.inbox,
                wake: &self.wake,
                epoch: self.epoch,
            },
            finish: None,
        };
        let out = f(game, &mut host);
        let finish = host.finish;
        match finish {
            Some(Finish::Complete) => match self.active_level {
                Some(index) => {
                    self.complete_level(index);
                }
                None => log::warn!("game finished outside of a level"),
            },
            Some(Finish::ReturnToMap) => self.enter(Route::map()),
            None => {}
        }
        Some(out)
    }

    // --- Map ------------------------------------------------------------------

    pub fn map_view(&self) -> MapView {
        let completed = self.store.completed_levels();
        let groups: Vec<GroupView> = calculate_groups(self.levels, completed)
            .into_iter()
            .map(|group| GroupView {
                number: group.group_number,
                locked: group.is_locked,
                completed: group.is_completed,
                reward: group.reward(),
                levels: group
                    .levels
                    .iter()
                    .map(|entry| LevelTile {
                        index: entry.index,
                        name: entry.level.name,
                        icon: entry.level.icon(group.is_locked),
                        kind: entry.level.kind(),
                        completed: completed.contains(&entry.index),
                    })
                    .collect(),
            })
            .collect();
        let inventory = groups
            .iter()
            .filter(|g| g.completed)
            .map(|g| InventorySlot {
                group_number: g.number,
                reward: g.reward,
                icon: g.reward.icon(),
            })
            .collect();
        MapView {
            score: self.store.score(),
            difficulty: self.store.difficulty(),
            groups,
            inventory,
            scroll_to: match self.route {
                Route::Map { scroll_to } => scroll_to,
                _ => None,
            },
            reward: self.shown_reward,
            can_practice: !completed.is_empty(),
        }
    }
}
