//! Browser shell: the shared app handle, score overlay, URL hash and the
//! functions exported to the page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window, window};

use crate::app::GameApp;
use crate::config::GameConfig;
use crate::difficulty::Difficulty;
use crate::error::GameError;
use crate::feedback::{FeedbackSink, WebFeedback};
use crate::games::PlayerInput;
use crate::levels::levels;
use crate::logger;
use crate::progress::ProgressStore;
use crate::route::Route;
use crate::storage::BrowserStorage;
use crate::timers::BrowserScheduler;

const SCORE_ID: &str = "vf-score";

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<GameApp>>>> = RefCell::new(None);
}

fn with_app<R>(f: impl FnOnce(&mut GameApp) -> R) -> Result<R, GameError> {
    let app = APP.with(|slot| slot.borrow().clone()).ok_or(GameError::NotStarted)?;
    let mut app = app.try_borrow_mut().map_err(|_| GameError::Busy)?;
    Ok(f(&mut app))
}

pub(crate) fn start(config: Option<String>) -> Result<(), JsValue> {
    let config = GameConfig::load_or_default(config.as_deref());
    logger::init(config.log_level());

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let store = ProgressStore::load(
        Box::new(BrowserStorage::new()),
        config.storage.clone(),
        levels().len(),
    );
    let feedback: Rc<dyn FeedbackSink> = Rc::new(WebFeedback::new(config.audio, config.speech.clone()));
    let app = GameApp::new(
        levels(),
        &config,
        store,
        feedback,
        Rc::new(BrowserScheduler),
        seed(&win),
    )
    .into_shared();

    ensure_score_overlay(&doc)?;
    {
        let mut app = app.borrow_mut();
        render_score(app.score());
        app.subscribe_progress(|snapshot| render_score(snapshot.score));
        app.on_route_change(mirror_hash);
    }
    APP.with(|slot| slot.replace(Some(app.clone())));

    let requested = win
        .location()
        .hash()
        .map(|hash| Route::parse(&hash))
        .unwrap_or(Route::Difficulty);
    let route = app.borrow_mut().start(requested);
    log::info!("vocab fox started on {route}");

    listen_hash_changes(&win)
}

fn seed(win: &Window) -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => return u64::from_le_bytes(buf),
            Err(e) => log::warn!("crypto rng unavailable ({e}), seeding from the clock"),
        }
    }
    let now = win.performance().map(|p| p.now()).unwrap_or(0.0);
    // Sub-millisecond digits carry most of the entropy.
    ((now * 1000.0) as u64).wrapping_mul(6364136223846793005)
}

fn ensure_score_overlay(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id(SCORE_ID).is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id(SCORE_ID);
            div.set_attribute("style", "position:fixed; top:10px; right:12px; font-family:'Comic Sans MS', 'Fredoka', sans-serif; font-size:20px; padding:6px 14px; background:rgba(255,255,255,0.85); border:2px solid #ffb347; border-radius:16px; color:#5a3e1b; z-index:45;").ok();
            body.append_child(&div)?;
        }
    }
    Ok(())
}

fn render_score(score: u32) {
    let el = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(SCORE_ID));
    if let Some(el) = el {
        el.set_text_content(Some(&format!("⭐ {score}")));
    }
}

fn mirror_hash(route: &Route) {
    let Some(location) = window().map(|w| w.location()) else { return };
    let path = route.to_path();
    if location.hash().ok().as_deref() == Some(format!("#{path}").as_str()) {
        return;
    }
    if let Err(e) = location.set_hash(&path) {
        log::warn!("could not update location hash: {e:?}");
    }
}

/// Back/forward buttons and hand-edited URLs go through the same guards.
fn listen_hash_changes(win: &Window) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        let Some(hash) = window().and_then(|w| w.location().hash().ok()) else { return };
        let target = Route::parse(&hash);
        let result = with_app(|app| {
            if app.route() == target {
                return Ok(target);
            }
            app.navigate(target).inspect_err(|_| mirror_hash(&app.route()))
        });
        if let Err(e) = result.and_then(|r| r) {
            log::warn!("cannot open {target}: {e}");
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    win.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// --- Exports ------------------------------------------------------------------

/// Store the difficulty (`easy`, `medium` or `hard`) and open the map.
#[wasm_bindgen]
pub fn select_difficulty(name: &str) -> Result<String, JsValue> {
    let difficulty: Difficulty = name.parse()?;
    Ok(with_app(|app| app.select_difficulty(difficulty))?.to_path())
}

#[wasm_bindgen]
pub fn open_level(index: usize) -> Result<String, JsValue> {
    Ok(with_app(|app| app.open_level(index))??.to_path())
}

#[wasm_bindgen]
pub fn open_practice() -> Result<String, JsValue> {
    Ok(with_app(|app| app.open_practice())??.to_path())
}

#[wasm_bindgen]
pub fn go_to_map() -> Result<String, JsValue> {
    Ok(with_app(|app| app.go_to_map())?.to_path())
}

/// Returns `false` for an index outside the catalog.
#[wasm_bindgen]
pub fn complete_level(index: usize) -> Result<bool, JsValue> {
    Ok(with_app(|app| app.complete_level(index).is_some())?)
}

#[wasm_bindgen]
pub fn add_score(amount: u32) -> Result<(), JsValue> {
    Ok(with_app(|app| app.add_score(amount))?)
}

#[wasm_bindgen]
pub fn subtract_score(amount: u32) -> Result<(), JsValue> {
    Ok(with_app(|app| app.subtract_score(amount))?)
}

#[wasm_bindgen]
pub fn score() -> u32 {
    with_app(|app| app.score()).unwrap_or(0)
}

/// Map groups, earned rewards and score as JSON.
#[wasm_bindgen]
pub fn map_state() -> Result<String, JsValue> {
    let json = with_app(|app| serde_json::to_string(&app.map_view()))?.map_err(GameError::from)?;
    Ok(json)
}

/// `{"groupIndex":..,"reward":..}` once per earned reward, then `undefined`.
#[wasm_bindgen]
pub fn consume_pending_reward() -> Result<Option<String>, JsValue> {
    let reward = with_app(|app| app.consume_pending_reward())?;
    let json = reward
        .map(|r| serde_json::to_string(&r))
        .transpose()
        .map_err(GameError::from)?;
    Ok(json)
}

#[wasm_bindgen]
pub fn reset_all() -> Result<String, JsValue> {
    Ok(with_app(|app| app.reset_all())?.to_path())
}

/// Feed a JSON-encoded player action to the running game. Returns whether
/// the game accepted it.
#[wasm_bindgen]
pub fn game_input(json: &str) -> Result<bool, JsValue> {
    let input: PlayerInput = serde_json::from_str(json).map_err(GameError::from)?;
    Ok(with_app(|app| app.game_input(input))??)
}

/// State of the running game as JSON, `undefined` off the game screens.
#[wasm_bindgen]
pub fn game_state() -> Result<Option<String>, JsValue> {
    let json = with_app(|app| app.game().map(serde_json::to_string).transpose())?.map_err(GameError::from)?;
    Ok(json)
}

#[wasm_bindgen]
pub fn current_route() -> Result<String, JsValue> {
    Ok(with_app(|app| app.route())?.to_path())
}
