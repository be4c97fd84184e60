//! wasm-bindgen boundary for browser hosts.
//!
//! The host calls [`start_session`] from a menu, then drives [`frame`] from
//! requestAnimationFrame and paints from [`snapshot`]. Input arrives either
//! through the document-level keyboard listeners attached here or through
//! the explicit [`set_move_dir`] / [`clear_move_dir`] exports (touch
//! controls, tests).

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::game::{ConfigError, Game, GameMode, SessionConfig};
use crate::tier::Tier;

struct ActiveGame {
    game: Game,
    /// Timestamp of the previous frame, None until the first one arrives.
    last_frame_ms: Option<f64>,
}

thread_local! {
    static ACTIVE_GAME: RefCell<Option<ActiveGame>> = RefCell::new(None);
    // Document listeners survive across sessions; attach them once.
    static LISTENERS_ATTACHED: Cell<bool> = Cell::new(false);
}

fn js_err(err: ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Begin a round. `mode` is `"arithmetic"` or `"alphabet"`, `players` 1 or
/// 2, `starting_tier` an optional `"easy"`/`"medium"`/`"hard"` override.
/// Replaces any round already in progress.
#[wasm_bindgen]
pub fn start_session(mode: &str, players: u8, starting_tier: Option<String>) -> Result<(), JsValue> {
    let mode = GameMode::from_str(mode)
        .ok_or_else(|| js_err(ConfigError::UnknownMode(mode.to_string())))?;
    let starting_tier = match starting_tier {
        Some(name) => {
            Tier::from_str(&name).ok_or_else(|| js_err(ConfigError::UnknownTier(name)))?
        }
        None => Tier::default(),
    };
    let game = Game::new(SessionConfig { mode, players, starting_tier }).map_err(js_err)?;
    ACTIVE_GAME.with(|cell| {
        cell.replace(Some(ActiveGame { game, last_frame_ms: None }));
    });
    ensure_keyboard_listeners()?;
    Ok(())
}

/// Drop the active round, if any.
#[wasm_bindgen]
pub fn end_session() {
    ACTIVE_GAME.with(|cell| {
        cell.replace(None);
    });
}

/// Advance the active round to `now_ms` (a performance.now() timestamp) and
/// return the events that fired as a JSON array string.
#[wasm_bindgen]
pub fn frame(now_ms: f64) -> Result<String, JsValue> {
    ACTIVE_GAME.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(active) = slot.as_mut() else {
            return Ok("[]".to_string());
        };
        // Clock skew or the very first frame both advance by zero.
        let delta_ms = active.last_frame_ms.map(|prev| (now_ms - prev).max(0.0)).unwrap_or(0.0);
        active.last_frame_ms = Some(now_ms);
        let events = active.game.advance(delta_ms);
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

/// Full render state as a JSON string, or `"null"` when no round is active.
#[wasm_bindgen]
pub fn snapshot() -> Result<String, JsValue> {
    ACTIVE_GAME.with(|cell| {
        let slot = cell.borrow();
        match slot.as_ref() {
            Some(active) => serde_json::to_string(&active.game.snapshot())
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok("null".to_string()),
        }
    })
}

/// Hold or release a player's movement: `dir` -1, 0, or 1.
#[wasm_bindgen]
pub fn set_move_dir(player: u8, dir: i8) {
    with_game(|game| game.set_move_dir(player, dir));
}

/// Release movement if it still points in `dir`.
#[wasm_bindgen]
pub fn clear_move_dir(player: u8, dir: i8) {
    with_game(|game| game.clear_move_dir(player, dir));
}

#[wasm_bindgen]
pub fn toggle_pause() {
    with_game(|game| game.toggle_pause());
}

#[wasm_bindgen]
pub fn set_paused(paused: bool) {
    with_game(|game| if paused { game.pause() } else { game.resume() });
}

fn with_game(f: impl FnOnce(&mut Game)) {
    ACTIVE_GAME.with(|cell| {
        if let Some(active) = cell.borrow_mut().as_mut() {
            f(&mut active.game);
        }
    });
}

/// In solo play the arrows steer player 1 alongside A/D; in co-op they
/// belong to player 2.
fn arrow_target(game: &Game) -> u8 {
    if game.player2.is_some() { 2 } else { 1 }
}

fn ensure_keyboard_listeners() -> Result<(), JsValue> {
    if LISTENERS_ATTACHED.with(|attached| attached.get()) {
        return Ok(());
    }
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;

    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let key = evt.key();
            ACTIVE_GAME.with(|cell| {
                if let Some(active) = cell.borrow_mut().as_mut() {
                    let game = &mut active.game;
                    match key.as_str() {
                        "a" | "A" => game.set_move_dir(1, -1),
                        "d" | "D" => game.set_move_dir(1, 1),
                        "ArrowLeft" => {
                            let player = arrow_target(game);
                            game.set_move_dir(player, -1);
                        }
                        "ArrowRight" => {
                            let player = arrow_target(game);
                            game.set_move_dir(player, 1);
                        }
                        "p" | "P" => {
                            // Held key auto-repeat must not flicker the pause.
                            if !evt.repeat() {
                                game.toggle_pause();
                            }
                        }
                        _ => {}
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let key = evt.key();
            ACTIVE_GAME.with(|cell| {
                if let Some(active) = cell.borrow_mut().as_mut() {
                    let game = &mut active.game;
                    match key.as_str() {
                        "a" | "A" => game.clear_move_dir(1, -1),
                        "d" | "D" => game.clear_move_dir(1, 1),
                        "ArrowLeft" => {
                            let player = arrow_target(game);
                            game.clear_move_dir(player, -1);
                        }
                        "ArrowRight" => {
                            let player = arrow_target(game);
                            game.clear_move_dir(player, 1);
                        }
                        _ => {}
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    LISTENERS_ATTACHED.with(|attached| attached.set(true));
    Ok(())
}
