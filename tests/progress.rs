// Progress store behavior through the public API, backed by an in-memory
// key-value store shared between "page loads".

use std::cell::RefCell;
use std::rc::Rc;

use vocab_fox::config::StorageKeys;
use vocab_fox::difficulty::Difficulty;
use vocab_fox::progress::ProgressStore;
use vocab_fox::storage::MemoryStore;

const LEVELS: usize = 10;

fn backend(values: &[(&str, &str)]) -> Rc<RefCell<MemoryStore>> {
    Rc::new(RefCell::new(MemoryStore::with_values(values.iter().copied())))
}

fn load(backend: &Rc<RefCell<MemoryStore>>) -> ProgressStore {
    ProgressStore::load(Box::new(backend.clone()), StorageKeys::default(), LEVELS)
}

#[test]
fn scenario_c_score_never_goes_negative() {
    let mut store = ProgressStore::in_memory(LEVELS);
    assert_eq!(store.score(), 0);
    store.add_score(10);
    assert_eq!(store.score(), 10);
    store.subtract_score(5);
    assert_eq!(store.score(), 5);
    store.subtract_score(20);
    assert_eq!(store.score(), 0);
    store.subtract_score(u32::MAX);
    assert_eq!(store.score(), 0);
}

#[test]
fn marking_twice_equals_marking_once() {
    let mut store = ProgressStore::in_memory(LEVELS);
    assert!(store.mark_level_complete(3));
    let once = store.completed_levels().clone();
    assert!(!store.mark_level_complete(3));
    assert_eq!(store.completed_levels(), &once);
}

#[test]
fn out_of_range_completion_is_ignored() {
    let mut store = ProgressStore::in_memory(LEVELS);
    assert!(!store.mark_level_complete(LEVELS));
    assert!(!store.mark_level_complete(usize::MAX));
    assert!(store.completed_levels().is_empty());
}

#[test]
fn reload_resumes_exact_state() {
    let shared = backend(&[]);
    {
        let mut store = load(&shared);
        store.add_score(35);
        store.mark_level_complete(0);
        store.mark_level_complete(4);
        store.set_difficulty(Difficulty::Medium);
    }
    assert_eq!(shared.borrow().raw("englishGameScore"), Some("35"));
    assert_eq!(shared.borrow().raw("englishGameCompletedLevels"), Some("[0,4]"));
    assert_eq!(shared.borrow().raw("englishGameDifficulty"), Some("\"medium\""));

    let store = load(&shared);
    assert_eq!(store.score(), 35);
    assert_eq!(store.completed_levels().iter().copied().collect::<Vec<_>>(), vec![0, 4]);
    assert_eq!(store.difficulty(), Some(Difficulty::Medium));
}

#[test]
fn legacy_bare_difficulty_is_read() {
    let store = load(&backend(&[("englishGameDifficulty", "hard")]));
    assert_eq!(store.difficulty(), Some(Difficulty::Hard));
    let store = load(&backend(&[("englishGameDifficulty", "\"easy\"")]));
    assert_eq!(store.difficulty(), Some(Difficulty::Easy));
}

#[test]
fn malformed_values_fall_back_to_defaults() {
    let store = load(&backend(&[
        ("englishGameScore", "lots"),
        ("englishGameCompletedLevels", "[1, \"two\", 3, 42]"),
        ("englishGameDifficulty", "impossible"),
    ]));
    assert_eq!(store.score(), 0);
    assert_eq!(store.completed_levels().iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(store.difficulty(), None);
}

#[test]
fn failed_writes_keep_playing_in_memory() {
    let shared = backend(&[("englishGameScore", "7")]);
    shared.borrow_mut().fail_writes = true;
    let mut store = load(&shared);
    store.add_score(10);
    store.mark_level_complete(2);
    store.set_difficulty(Difficulty::Easy);
    assert_eq!(store.score(), 17);
    assert!(store.is_level_completed(2));
    assert_eq!(store.difficulty(), Some(Difficulty::Easy));
    // Nothing reached the backend.
    assert_eq!(shared.borrow().raw("englishGameScore"), Some("7"));
    assert_eq!(shared.borrow().raw("englishGameCompletedLevels"), None);
}

#[test]
fn reset_clears_everything_and_persists() {
    let shared = backend(&[]);
    let mut store = load(&shared);
    store.add_score(50);
    store.mark_level_complete(1);
    store.set_difficulty(Difficulty::Hard);
    store.reset();
    assert_eq!(store.score(), 0);
    assert!(store.completed_levels().is_empty());
    assert_eq!(store.difficulty(), None);

    let reloaded = load(&shared);
    assert_eq!(reloaded.snapshot(), store.snapshot());
}

#[test]
fn custom_storage_keys_are_honored() {
    let shared = backend(&[("fox.score", "12")]);
    let keys = StorageKeys {
        score_key: "fox.score".into(),
        completed_key: "fox.done".into(),
        difficulty_key: "fox.level".into(),
    };
    let mut store = ProgressStore::load(Box::new(shared.clone()), keys, LEVELS);
    assert_eq!(store.score(), 12);
    store.mark_level_complete(5);
    assert_eq!(shared.borrow().raw("fox.done"), Some("[5]"));
    assert_eq!(shared.borrow().raw("englishGameCompletedLevels"), None);
}

#[test]
fn snapshot_serializes_in_camel_case() {
    let mut store = ProgressStore::in_memory(LEVELS);
    store.mark_level_complete(1);
    let json = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(json["score"], 0);
    assert_eq!(json["completedLevels"], serde_json::json!([1]));
    assert!(json["difficulty"].is_null());
}
