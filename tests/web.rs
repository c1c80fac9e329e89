// Browser smoke tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn boots_and_plays_through_the_exports() {
    vocab_fox::start_game(Some("[logging]\nlevel = \"debug\"".into())).unwrap();
    assert_eq!(vocab_fox::reset_all().unwrap(), "/");
    assert!(vocab_fox::open_level(0).is_ok());
    assert_eq!(vocab_fox::current_route().unwrap(), "/");

    assert_eq!(vocab_fox::select_difficulty("easy").unwrap(), "/map");
    assert!(vocab_fox::select_difficulty("impossible").is_err());
    assert_eq!(vocab_fox::open_level(0).unwrap(), "/level/0");
    assert!(vocab_fox::game_state().unwrap().unwrap().contains("\"game\":\"standard\""));
    assert!(vocab_fox::game_input(r#"{"action":"play"}"#).unwrap());
    assert!(vocab_fox::game_input(r#"{"action":"fly"}"#).is_err());

    vocab_fox::add_score(15).unwrap();
    vocab_fox::subtract_score(5).unwrap();
    assert_eq!(vocab_fox::score(), 10);
    assert!(vocab_fox::complete_level(0).unwrap());
    assert!(!vocab_fox::complete_level(999).unwrap());
    assert!(vocab_fox::map_state().unwrap().contains("\"groups\""));
    assert_eq!(vocab_fox::consume_pending_reward().unwrap(), None);

    let overlay = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("vf-score"))
        .and_then(|el| el.text_content());
    assert_eq!(overlay.as_deref(), Some("⭐ 10"));
}
