//! Per-player session state: the live problem, falling blocks, pacing, and
//! the spawn schedule.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::tier::Tier;

use super::{CATCHER_WIDTH, PLAY_WIDTH, TOWER_STRIP_WIDTH};

/// Fresh sessions start mid-range; pacing adapts from the first outcome on.
pub const SEED_FALL_SPEED: f32 = 100.0;
pub const SEED_SPAWN_INTERVAL_MS: u32 = 1200;

/// Sliding window size for recent outcomes.
pub const RECENT_RESULTS_CAP: usize = 5;

/// Which kind of problems a round serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Arithmetic,
    Alphabet,
}

impl GameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Arithmetic => "arithmetic",
            GameMode::Alphabet => "alphabet",
        }
    }

    pub fn from_str(s: &str) -> Option<GameMode> {
        match s {
            "arithmetic" => Some(GameMode::Arithmetic),
            "alphabet" => Some(GameMode::Alphabet),
            _ => None,
        }
    }
}

/// What a falling block carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockPayload {
    Number { value: u8 },
    /// `valid` records whether the letter completed the target word at spawn
    /// time. Blocks only outlive a problem on failure, which keeps the
    /// problem, so the flag never goes stale.
    Letter { letter: char, valid: bool },
}

/// One block in flight. `x`/`y` are the block's center in play-field px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallingBlock {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub payload: BlockPayload,
}

impl FallingBlock {
    /// Text the host paints on the block face.
    pub fn label(&self) -> String {
        match self.payload {
            BlockPayload::Number { value } => value.to_string(),
            BlockPayload::Letter { letter, .. } => letter.to_string(),
        }
    }
}

/// Horizontal band one session plays in. Catcher travel is clamped to
/// `catcher_min..=catcher_max`; spawn x is drawn uniformly from
/// `spawn_min..=spawn_max` (whole px, 50 px inside the band edges).
#[derive(Clone, Copy, Debug)]
pub struct Lane {
    pub catcher_min: f32,
    pub catcher_max: f32,
    pub spawn_min: i32,
    pub spawn_max: i32,
}

impl Lane {
    /// Full width for a single player, minus the tower strip on the left.
    pub fn solo() -> Lane {
        let start = TOWER_STRIP_WIDTH + 10.0;
        let end = PLAY_WIDTH - 10.0;
        let catcher_min = start + CATCHER_WIDTH / 2.0;
        let catcher_max = end - CATCHER_WIDTH / 2.0;
        Lane {
            catcher_min,
            catcher_max,
            // Spawns cover exactly the travel band.
            spawn_min: catcher_min as i32,
            spawn_max: catcher_max as i32,
        }
    }

    /// Left half for co-op player 1. Spawns sit 50 px inside the half so
    /// edge blocks stay reachable from both sides.
    pub fn coop_left() -> Lane {
        let start = TOWER_STRIP_WIDTH + 10.0;
        let end = PLAY_WIDTH / 2.0 - 10.0;
        Lane {
            catcher_min: start + CATCHER_WIDTH / 2.0,
            catcher_max: end - CATCHER_WIDTH / 2.0,
            spawn_min: (start + 50.0) as i32,
            spawn_max: (end - 50.0) as i32,
        }
    }

    /// Right half for co-op player 2, mirroring the tower strip margin.
    pub fn coop_right() -> Lane {
        let start = PLAY_WIDTH / 2.0 + 10.0;
        let end = PLAY_WIDTH - TOWER_STRIP_WIDTH - 10.0;
        Lane {
            catcher_min: start + CATCHER_WIDTH / 2.0,
            catcher_max: end - CATCHER_WIDTH / 2.0,
            spawn_min: (start + 50.0) as i32,
            spawn_max: (end - 50.0) as i32,
        }
    }

    /// Catcher rest position, centered in the travel band.
    pub fn center(&self) -> f32 {
        (self.catcher_min + self.catcher_max) / 2.0
    }
}

/// Repeating countdown that drives block spawns. Ticks only while the game
/// advances, so pausing freezes the remaining delay in place. Restarting is
/// a plain assignment, which atomically drops any elapsed progress.
#[derive(Clone, Copy, Debug)]
pub struct SpawnTimer {
    interval_ms: u32,
    remaining_ms: f64,
}

impl SpawnTimer {
    pub fn new(interval_ms: u32) -> SpawnTimer {
        SpawnTimer { interval_ms, remaining_ms: interval_ms as f64 }
    }

    /// Reissue the schedule at a new interval, starting a full period away.
    pub fn restart(&mut self, interval_ms: u32) {
        *self = SpawnTimer::new(interval_ms);
    }

    /// Advance by `delta_ms`; returns how many times the timer fired. Long
    /// deltas catch up one whole period at a time.
    pub fn tick(&mut self, delta_ms: f64) -> u32 {
        self.remaining_ms -= delta_ms;
        let mut fired = 0;
        while self.remaining_ms <= 0.0 {
            fired += 1;
            self.remaining_ms += self.interval_ms as f64;
        }
        fired
    }

    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms
    }
}

/// Everything one player's round tracks between frames.
#[derive(Debug)]
pub struct PlayerSession {
    pub current_sum: u8,
    pub target_sum: u8,
    /// Start value for the subtraction variant. The generator never rolls
    /// subtraction, so this stays 0.
    pub start_num: u8,
    pub is_subtraction: bool,
    /// Values caught toward the current target, oldest first.
    pub caught_numbers: Vec<u8>,
    /// Active word family slot (`"_AT"`), empty in arithmetic mode.
    pub current_pattern: &'static str,
    pub target_word: &'static str,
    /// Words the current family deals, snapshotted with each new problem.
    pub valid_words: &'static [&'static str],
    pub tower_height: u32,
    pub tier: Tier,
    pub blocks: Vec<FallingBlock>,
    /// Last few outcomes, oldest first, capped at [`RECENT_RESULTS_CAP`].
    pub recent_results: VecDeque<bool>,
    pub fall_speed: f32,
    pub spawn_interval_ms: u32,
    /// Positive run of successes or negative run of failures.
    pub streak: i32,
    pub catcher_x: f32,
    /// Held input: -1 left, 0 idle, 1 right.
    pub move_dir: i8,
    pub lane: Lane,
    pub spawn_timer: SpawnTimer,
    /// One-shot delay before the round's second opening block.
    pub opener_ms: Option<f64>,
    /// One-shot delay between a failure and the progress reset.
    pub fail_hold_ms: Option<f64>,
}

impl PlayerSession {
    pub fn new(tier: Tier, lane: Lane) -> PlayerSession {
        PlayerSession {
            current_sum: 0,
            target_sum: 0,
            start_num: 0,
            is_subtraction: false,
            caught_numbers: Vec::new(),
            current_pattern: "",
            target_word: "",
            valid_words: &[],
            tower_height: 0,
            tier,
            blocks: Vec::new(),
            recent_results: VecDeque::with_capacity(RECENT_RESULTS_CAP + 1),
            fall_speed: SEED_FALL_SPEED,
            spawn_interval_ms: SEED_SPAWN_INTERVAL_MS,
            streak: 0,
            catcher_x: lane.center(),
            move_dir: 0,
            lane,
            spawn_timer: SpawnTimer::new(SEED_SPAWN_INTERVAL_MS),
            opener_ms: None,
            fail_hold_ms: None,
        }
    }

    /// Push an outcome into the sliding window, evicting the oldest entry
    /// past the cap.
    pub fn record_result(&mut self, success: bool) {
        self.recent_results.push_back(success);
        if self.recent_results.len() > RECENT_RESULTS_CAP {
            self.recent_results.pop_front();
        }
    }

    /// Signed distance to the target. Zero or negative means met or overshot.
    pub fn needed(&self) -> i32 {
        if self.is_subtraction {
            self.current_sum as i32 - self.target_sum as i32
        } else {
            self.target_sum as i32 - self.current_sum as i32
        }
    }
}
