// Integration tests (native) for the `vocab-fox` crate.
// A whole session is driven through `GameApp` with a virtual clock and a
// feedback sink that records cues instead of playing them.

use std::cell::RefCell;
use std::rc::Rc;

use vocab_fox::app::GameApp;
use vocab_fox::config::GameConfig;
use vocab_fox::difficulty::Difficulty;
use vocab_fox::feedback::{Cue, FeedbackSink};
use vocab_fox::games::{MiniGame, PlayerInput};
use vocab_fox::levels::levels;
use vocab_fox::progress::ProgressStore;
use vocab_fox::route::{ReviewMode, Route};
use vocab_fox::timers::ManualScheduler;
use vocab_fox::{GameError, Reward};

#[derive(Default)]
struct Recorder {
    cues: RefCell<Vec<Cue>>,
    spoken: RefCell<Vec<String>>,
}

impl FeedbackSink for Recorder {
    fn play(&self, cue: Cue) {
        self.cues.borrow_mut().push(cue);
    }

    fn speak(&self, text: &str, _rate: f32) {
        self.spoken.borrow_mut().push(text.to_string());
    }
}

struct Session {
    app: Rc<RefCell<GameApp>>,
    clock: Rc<ManualScheduler>,
    sound: Rc<Recorder>,
}

fn session(config: &GameConfig, store: ProgressStore) -> Session {
    let clock = Rc::new(ManualScheduler::new());
    let sound = Rc::new(Recorder::default());
    let app = GameApp::new(levels(), config, store, sound.clone(), clock.clone(), 1234).into_shared();
    Session { app, clock, sound }
}

fn with_progress(difficulty: Difficulty, completed: impl IntoIterator<Item = usize>) -> ProgressStore {
    let mut store = ProgressStore::in_memory(levels().len());
    store.set_difficulty(difficulty);
    for i in completed {
        store.mark_level_complete(i);
    }
    store
}

impl Session {
    fn route(&self) -> Route {
        self.app.borrow().route()
    }

    fn input(&self, input: PlayerInput) -> bool {
        self.app.borrow_mut().game_input(input).unwrap()
    }

    /// Answer the running flashcard or review round correctly once.
    fn answer_card_round(&self) {
        assert!(self.input(PlayerInput::Play));
        let pick = {
            let app = self.app.borrow();
            match app.game() {
                Some(MiniGame::Standard(g)) => {
                    let target = g.target().unwrap();
                    g.cards().iter().position(|c| c.item.name == target.name).unwrap()
                }
                Some(MiniGame::Review(g)) => {
                    let target = g.target().unwrap();
                    g.cards().iter().position(|c| c.item.name == target.name).unwrap()
                }
                _ => panic!("no card game running"),
            }
        };
        assert!(self.input(PlayerInput::Pick { index: pick }));
    }
}

#[test]
fn first_visit_picks_difficulty_then_plays_level_one() {
    let s = session(&GameConfig::default(), ProgressStore::in_memory(levels().len()));
    assert_eq!(s.app.borrow_mut().start(Route::map()), Route::Difficulty);
    assert_eq!(s.app.borrow_mut().select_difficulty(Difficulty::Easy), Route::map());
    assert_eq!(s.sound.cues.borrow().last(), Some(&Cue::GameStart));

    s.app.borrow_mut().open_level(0).unwrap();
    for _ in 0..3 {
        s.answer_card_round();
        s.clock.advance(1000);
    }
    // Hidden card, then the completion pause, then the map.
    s.clock.advance(1000);
    assert_eq!(s.route(), Route::Level { index: 0 });
    s.clock.advance(2000);
    assert_eq!(s.route(), Route::Map { scroll_to: Some(1) });
    assert_eq!(s.app.borrow().score(), 30);
    assert!(s.sound.spoken.borrow().len() >= 3);
}

#[test]
fn auto_review_closes_the_first_group_with_a_crown() {
    let s = session(&GameConfig::default(), with_progress(Difficulty::Medium, 0..4));
    let route = s.app.borrow_mut().open_level(4).unwrap();
    assert!(matches!(route, Route::Review { review: ReviewMode::Auto { level_index: 4, .. } }));

    // Each review round: hide the card, then deal the next pair.
    for _ in 0..5 {
        s.answer_card_round();
        s.clock.advance(2000);
    }
    s.clock.advance(5000);
    assert_eq!(s.route(), Route::Map { scroll_to: Some(5) });
    assert!(s.sound.cues.borrow().contains(&Cue::Victory));

    let view = s.app.borrow().map_view();
    assert_eq!(view.reward.map(|r| r.group_index), Some(0));
    assert_eq!(view.inventory.len(), 1);
    assert_eq!(view.inventory[0].reward, Reward::Crown);
    assert!(!view.groups[1].locked);

    assert!(s.app.borrow_mut().consume_pending_reward().is_some());
    assert!(s.app.borrow_mut().consume_pending_reward().is_none());
}

#[test]
fn leaving_mid_round_drops_its_delayed_steps() {
    let s = session(&GameConfig::default(), with_progress(Difficulty::Easy, []));
    s.app.borrow_mut().open_level(0).unwrap();
    s.answer_card_round();
    let score = s.app.borrow().score();
    s.app.borrow_mut().go_to_map();
    s.clock.advance(10_000);
    assert_eq!(s.route(), Route::map());
    assert_eq!(s.app.borrow().score(), score);
    assert!(s.app.borrow().progress().completed_levels.is_empty());
}

#[test]
fn free_practice_returns_to_the_map_without_completing() {
    let s = session(&GameConfig::default(), with_progress(Difficulty::Hard, [0, 1]));
    s.app.borrow_mut().open_practice().unwrap();
    for _ in 0..5 {
        s.answer_card_round();
        s.clock.advance(2000);
    }
    s.clock.advance(2000);
    assert_eq!(s.route(), Route::map());
    assert_eq!(s.app.borrow().progress().completed_levels.len(), 2);
}

#[test]
fn refused_routes() {
    let s = session(&GameConfig::default(), with_progress(Difficulty::Easy, []));
    let mut app = s.app.borrow_mut();
    assert!(matches!(app.open_level(10), Err(GameError::LevelLocked(10))));
    assert!(matches!(app.open_practice(), Err(GameError::NothingToPractice)));
    // Deep links to a locked level land on the map.
    assert_eq!(app.start(Route::parse("#/level/24")), Route::map());
}

#[test]
fn finishing_the_catalog_shows_victory() {
    let last = levels().len() - 1;
    let s = session(&GameConfig::default(), with_progress(Difficulty::Easy, 0..last));
    s.app.borrow_mut().open_level(last).unwrap();
    let outcome = s.app.borrow_mut().complete_level(last).unwrap();
    assert!(outcome.all_complete);
    s.clock.advance(2000);
    assert_eq!(s.route(), Route::Victory);
}

#[test]
fn configured_timing_and_scoring_apply() {
    let config = GameConfig::from_toml(
        r#"
        [timing]
        feedback_ms = 200
        transition_ms = 300

        [scoring]
        correct = 7
        "#,
    )
    .unwrap();
    let s = session(&config, with_progress(Difficulty::Easy, []));
    s.app.borrow_mut().open_level(0).unwrap();
    for _ in 0..3 {
        s.answer_card_round();
        s.clock.advance(200);
    }
    s.clock.advance(200 + 300);
    assert_eq!(s.route(), Route::Map { scroll_to: Some(1) });
    assert_eq!(s.app.borrow().score(), 21);
}

#[test]
fn reset_wipes_a_session() {
    let s = session(&GameConfig::default(), with_progress(Difficulty::Medium, 0..6));
    s.app.borrow_mut().add_score(100);
    s.app.borrow_mut().subtract_score(30);
    assert_eq!(s.app.borrow().score(), 70);
    assert_eq!(s.app.borrow_mut().reset_all(), Route::Difficulty);
    let view = s.app.borrow().map_view();
    assert_eq!(view.score, 0);
    assert!(view.inventory.is_empty());
    assert_eq!(view.difficulty, None);
}

#[test]
fn score_observers_follow_game_scoring() {
    let s = session(&GameConfig::default(), with_progress(Difficulty::Easy, []));
    let scores = Rc::new(RefCell::new(Vec::new()));
    let sink = scores.clone();
    s.app.borrow_mut().subscribe_progress(move |p| sink.borrow_mut().push(p.score));
    s.app.borrow_mut().open_level(0).unwrap();
    s.answer_card_round();
    assert_eq!(*scores.borrow(), vec![10]);
}
