//! Emoji Builders core crate.
//!
//! Catch-and-stack gameplay for one or two players. Numbered blocks add up
//! toward a target sum, lettered blocks complete short phonics words, and
//! every solved problem banks one block on a tower. The first tower to
//! reach the goal height ends the round with a win.
//!
//! The gameplay core under [`game`] is host-agnostic plain Rust; native
//! tests drive it directly with explicit frame deltas. [`web`] is the
//! wasm-bindgen boundary a browser host calls from requestAnimationFrame.

use wasm_bindgen::prelude::*;

pub mod game;
pub mod tier;
pub mod web;
pub mod words;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Word -> emoji dataset (alphabet-mode hints and tower labels)
// -----------------------------------------------------------------------------

/// Emoji hint for every word the phonics families deal. Emoji repeat across
/// words (RUN and JOG both show the runner); words never repeat.
pub const WORD_EMOJI: &[(&str, &str)] = &[
    // _AT
    ("CAT", "🐈"), ("BAT", "🦇"), ("HAT", "🎩"), ("MAT", "🧹"), ("RAT", "🐀"), ("SAT", "🪑"),
    ("PAT", "👋"), ("FAT", "🍔"),
    // _OG
    ("DOG", "🐕"), ("LOG", "🪵"), ("FOG", "🌫️"), ("HOG", "🐷"), ("JOG", "🏃"), ("BOG", "🌿"),
    // _UN
    ("SUN", "☀️"), ("RUN", "🏃"), ("FUN", "🎉"), ("BUN", "🥯"), ("GUN", "🔫"), ("PUN", "😄"),
    // _AN
    ("CAN", "🥫"), ("MAN", "👨"), ("PAN", "🍳"), ("FAN", "🌀"), ("RAN", "🏃"), ("TAN", "☀️"),
    ("VAN", "🚐"),
    // _EN
    ("HEN", "🐔"), ("PEN", "🖊️"), ("TEN", "🔟"), ("MEN", "👨‍👨‍👦"), ("DEN", "🏠"), ("BEN", "👦"),
    // _IT
    ("SIT", "🪑"), ("HIT", "👊"), ("BIT", "🦷"), ("FIT", "💪"), ("KIT", "🧰"), ("PIT", "🕳️"),
    // _OP
    ("TOP", "🔝"), ("HOP", "🐰"), ("MOP", "🧹"), ("POP", "🎈"), ("COP", "👮"),
    // _UG
    ("BUG", "🐛"), ("HUG", "🤗"), ("MUG", "☕"), ("RUG", "🧶"), ("TUG", "🚢"), ("JUG", "🫗"),
    // _OT
    ("HOT", "🔥"), ("POT", "🍲"), ("DOT", "⚫"), ("COT", "🛏️"), ("GOT", "✅"), ("NOT", "❌"),
    // _ED
    ("BED", "🛏️"), ("RED", "🔴"), ("FED", "🍽️"), ("LED", "💡"),
];

/// Emoji for a word, or the question-mark fallback for anything unlisted.
/// Lookup ignores ASCII case.
pub fn emoji_for_word(word: &str) -> &'static str {
    WORD_EMOJI
        .iter()
        .find(|(w, _)| w.eq_ignore_ascii_case(word))
        .map(|(_, emoji)| *emoji)
        .unwrap_or("❓")
}
