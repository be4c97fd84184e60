// Browser-side smoke tests for the wasm boundary. These need a real
// document for the keyboard listeners, so run them with
// `wasm-pack test --headless --chrome` (native `cargo test` skips them).

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

use emoji_builders::web;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn session_round_trip_over_the_boundary() {
    web::start_session("arithmetic", 1, None).expect("valid session config");
    let snapshot = web::snapshot().expect("snapshot serializes");
    assert!(snapshot.contains("\"mode\":\"arithmetic\""), "got {snapshot}");

    // The first frame only seeds the clock; the next one spans the opener.
    let events = web::frame(16.0).expect("first frame");
    assert_eq!(events, "[]");
    let events = web::frame(532.0).expect("second frame");
    assert!(events.contains("block_spawned"), "got {events}");

    web::end_session();
    assert_eq!(web::snapshot().expect("snapshot serializes"), "null");
}

#[wasm_bindgen_test]
fn bad_config_is_rejected_at_the_boundary() {
    assert!(web::start_session("calculus", 1, None).is_err());
    assert!(web::start_session("arithmetic", 3, None).is_err());
    assert!(web::start_session("alphabet", 1, Some("impossible".to_string())).is_err());
}
