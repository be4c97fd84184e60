//! Round orchestration: player sessions, the frame loop, catch handling,
//! and the win check.
//!
//! Everything here is host-agnostic plain Rust. The browser boundary in
//! [`crate::web`] owns a [`Game`] and drives it from requestAnimationFrame;
//! native tests drive it with explicit deltas.

pub mod adaptive;
pub mod cues;
pub mod problem;
pub mod resolve;
pub mod session;
pub mod spawner;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tier::Tier;

pub use cues::{CueSink, NullCues};
pub use resolve::CatchOutcome;
pub use session::{BlockPayload, FallingBlock, GameMode, Lane, PlayerSession, SpawnTimer};

// -----------------------------------------------------------------------------
// Play-field geometry (px, y grows downward)
// -----------------------------------------------------------------------------

pub const PLAY_WIDTH: f32 = 1024.0;
pub const PLAY_HEIGHT: f32 = 768.0;
pub const BLOCK_SIZE: f32 = 50.0;
pub const CATCHER_WIDTH: f32 = 80.0;
pub const CATCHER_HEIGHT: f32 = 20.0;
pub const CATCHER_Y: f32 = PLAY_HEIGHT - 50.0;
pub const CATCHER_SPEED: f32 = 380.0;
pub const TOWER_STRIP_WIDTH: f32 = 90.0;

/// Banked blocks needed to win a round.
pub const TOWER_GOAL: u32 = 6;

/// Delay before the round's second opening block.
const OPENER_DELAY_MS: f64 = 500.0;
/// How long a failed answer stays on screen before progress resets.
const FAIL_HOLD_MS: f64 = 500.0;

/// Round parameters supplied by the host.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct SessionConfig {
    pub mode: GameMode,
    pub players: u8,
    #[serde(default)]
    pub starting_tier: Tier,
}

/// Rejected round parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown game mode '{0}'")]
    UnknownMode(String),
    #[error("unknown difficulty tier '{0}'")]
    UnknownTier(String),
    #[error("player count must be 1 or 2, got {0}")]
    PlayerCount(u8),
}

/// Frame events for the host, drained by [`Game::advance`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    BlockSpawned { player: u8 },
    BlockCaught { player: u8 },
    CatchSuccess { player: u8, summary: String, tower_blocks: u32 },
    CatchFail { player: u8 },
    Paused { paused: bool },
    Win { mode: GameMode, players: u8, tower_blocks: u32 },
}

/// One falling block as the host draws it.
#[derive(Clone, Debug, Serialize)]
pub struct BlockView {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub label: String,
}

/// Per-player render state.
#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub catcher_x: f32,
    pub tower_height: u32,
    pub tier: Tier,
    pub equation: String,
    pub instruction: String,
    pub streak: i32,
    pub fall_speed: f32,
    pub spawn_interval_ms: u32,
    pub blocks: Vec<BlockView>,
}

/// Whole-round render state.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub players: u8,
    pub paused: bool,
    pub won: bool,
    pub tower_goal: u32,
    pub shared_tower: u32,
    pub tower_labels: Vec<String>,
    pub player1: PlayerView,
    pub player2: Option<PlayerView>,
}

/// One live round: both sessions, the shared tower, and the frame loop.
pub struct Game {
    pub mode: GameMode,
    pub player1: PlayerSession,
    /// Present only in co-op.
    pub player2: Option<PlayerSession>,
    /// Co-op progress; both players bank into it.
    pub shared_tower: u32,
    /// One label per banked block, oldest first (solved sums or word emoji).
    pub tower_labels: Vec<String>,
    pub paused: bool,
    pub won: bool,
    rng: StdRng,
    cues: Box<dyn CueSink>,
    events: Vec<GameEvent>,
    next_block_id: u64,
}

impl Game {
    /// Build a round from host config, seeding from OS entropy and staying
    /// silent.
    pub fn new(config: SessionConfig) -> Result<Game, ConfigError> {
        Game::with_parts(config, StdRng::from_entropy(), Box::new(NullCues))
    }

    /// Build a round with an explicit RNG and cue sink.
    pub fn with_parts(
        config: SessionConfig,
        rng: StdRng,
        cues: Box<dyn CueSink>,
    ) -> Result<Game, ConfigError> {
        if !(1..=2).contains(&config.players) {
            return Err(ConfigError::PlayerCount(config.players));
        }
        let coop = config.players == 2;
        let mut game = Game {
            mode: config.mode,
            player1: PlayerSession::new(
                config.starting_tier,
                if coop { Lane::coop_left() } else { Lane::solo() },
            ),
            player2: coop
                .then(|| PlayerSession::new(config.starting_tier, Lane::coop_right())),
            shared_tower: 0,
            tower_labels: Vec::new(),
            paused: false,
            won: false,
            rng,
            cues,
            events: Vec::new(),
            next_block_id: 0,
        };
        log::info!(
            "starting {} round for {} player(s) at tier {}",
            config.mode.as_str(),
            config.players,
            config.starting_tier.as_str()
        );
        game.cues.music_start();
        game.open_player(1);
        if coop {
            game.open_player(2);
        }
        // The opening spawns predate the first frame; hosts read them from
        // the first snapshot, so the event queue starts empty.
        game.events.clear();
        Ok(game)
    }

    /// Borrow a session by 1-based player number.
    pub fn session(&self, player: u8) -> Option<&PlayerSession> {
        match player {
            1 => Some(&self.player1),
            2 => self.player2.as_ref(),
            _ => None,
        }
    }

    /// Mutable session access, same numbering.
    pub fn session_mut(&mut self, player: u8) -> Option<&mut PlayerSession> {
        match player {
            1 => Some(&mut self.player1),
            2 => self.player2.as_mut(),
            _ => None,
        }
    }

    fn players(&self) -> u8 {
        if self.player2.is_some() { 2 } else { 1 }
    }

    /// Roll the first problem and choreograph the opening spawns: one
    /// guaranteed-useful block immediately, a second shortly after.
    fn open_player(&mut self, player: u8) {
        {
            let Game { mode, player1, player2, rng, .. } = self;
            let Some(session) = pick(player, player1, player2.as_mut()) else { return };
            problem::start_new_problem(session, *mode, rng);
        }
        self.spawn_block(player, true);
        if let Some(session) = self.session_mut(player) {
            session.opener_ms = Some(OPENER_DELAY_MS);
        }
    }

    /// Advance the round by `delta_ms` and drain the events that fired.
    /// Paused and finished rounds ignore the delta entirely.
    pub fn advance(&mut self, delta_ms: f64) -> Vec<GameEvent> {
        if !self.paused && !self.won {
            self.advance_player(1, delta_ms);
            if self.player2.is_some() {
                self.advance_player(2, delta_ms);
            }
        }
        std::mem::take(&mut self.events)
    }

    fn advance_player(&mut self, player: u8, delta_ms: f64) {
        let (hold_due, opener_due, spawns_due) = {
            let Some(session) = self.session_mut(player) else { return };

            // Held input moves the catcher, clamped to its lane.
            let step = session.move_dir as f32 * CATCHER_SPEED * (delta_ms / 1000.0) as f32;
            session.catcher_x = (session.catcher_x + step)
                .clamp(session.lane.catcher_min, session.lane.catcher_max);

            let hold_due = tick_one_shot(&mut session.fail_hold_ms, delta_ms);
            let opener_due = tick_one_shot(&mut session.opener_ms, delta_ms);
            let spawns_due = session.spawn_timer.tick(delta_ms);
            (hold_due, opener_due, spawns_due)
        };

        if hold_due {
            self.apply_fail_reset(player);
        }
        if opener_due {
            self.spawn_block(player, false);
        }
        for _ in 0..spawns_due {
            self.spawn_block(player, false);
        }

        self.fall_and_catch(player, delta_ms);

        if let Some(session) = self.session_mut(player) {
            session.blocks.retain(|b| b.y <= PLAY_HEIGHT + BLOCK_SIZE);
        }
    }

    fn fall_and_catch(&mut self, player: u8, delta_ms: f64) {
        let caught = {
            let Some(session) = self.session_mut(player) else { return };
            let fall = session.fall_speed * (delta_ms / 1000.0) as f32;
            for block in &mut session.blocks {
                block.y += fall;
            }
            // Newest block first, at most one catch per frame. A success
            // clears the rest anyway.
            let catcher_x = session.catcher_x;
            session.blocks.iter().rev().find(|b| resolve::in_catch_zone(b, catcher_x)).map(|b| b.id)
        };
        if let Some(id) = caught {
            self.catch_block(player, id);
        }
    }

    fn catch_block(&mut self, player: u8, id: u64) {
        let mode = self.mode;
        let payload = {
            let Some(session) = self.session_mut(player) else { return };
            let Some(index) = session.blocks.iter().position(|b| b.id == id) else { return };
            session.blocks.remove(index).payload
        };
        self.cues.catch();
        self.events.push(GameEvent::BlockCaught { player });
        let outcome = match self.session_mut(player) {
            Some(session) => resolve::resolve_catch(session, mode, payload),
            None => return,
        };
        match outcome {
            CatchOutcome::Progress => {}
            CatchOutcome::Success => self.player_success(player),
            CatchOutcome::Failure => self.player_fail(player),
        }
    }

    fn spawn_block(&mut self, player: u8, force_correct: bool) {
        {
            let Game { mode, player1, player2, rng, next_block_id, .. } = self;
            let Some(session) = pick(player, player1, player2.as_mut()) else { return };
            let Some(payload) = spawner::next_payload(session, *mode, force_correct, rng) else {
                return;
            };
            let x = rng.gen_range(session.lane.spawn_min..=session.lane.spawn_max) as f32;
            let id = *next_block_id;
            *next_block_id += 1;
            session.blocks.push(FallingBlock { id, x, y: -BLOCK_SIZE, payload });
        }
        self.cues.block_spawn();
        self.events.push(GameEvent::BlockSpawned { player });
    }

    fn player_success(&mut self, player: u8) {
        self.cues.success();
        let mode = self.mode;
        let coop = self.player2.is_some();
        let (summary, label, own_tower) = {
            let Some(session) = self.session_mut(player) else { return };
            session.streak = (session.streak + 1).max(1);
            session.record_result(true);
            adaptive::update_pacing(session);

            // Summary and label read the catches before anything clears them.
            let summary = success_summary(session, mode);
            let label = match mode {
                GameMode::Arithmetic => session.target_sum.to_string(),
                GameMode::Alphabet => crate::emoji_for_word(session.target_word).to_string(),
            };

            // Stray blocks must not resolve against the next problem.
            session.blocks.clear();
            session.tower_height += 1;
            (summary, label, session.tower_height)
        };
        if coop {
            self.shared_tower += 1;
        }
        self.tower_labels.push(label);
        let tower_blocks = if coop { self.shared_tower } else { own_tower };
        self.events.push(GameEvent::CatchSuccess { player, summary, tower_blocks });
        if self.check_win() {
            return;
        }
        {
            let Game { mode, player1, player2, rng, .. } = self;
            let Some(session) = pick(player, player1, player2.as_mut()) else { return };
            problem::start_new_problem(session, *mode, rng);
        }
        self.spawn_block(player, true);
    }

    fn player_fail(&mut self, player: u8) {
        self.cues.fail();
        if let Some(session) = self.session_mut(player) {
            session.streak = (session.streak - 1).min(-1);
            session.record_result(false);
            adaptive::update_pacing(session);
            // The wrong answer stays on screen briefly before progress wipes.
            session.fail_hold_ms = Some(FAIL_HOLD_MS);
        }
        self.events.push(GameEvent::CatchFail { player });
    }

    fn apply_fail_reset(&mut self, player: u8) {
        let Some(session) = self.session_mut(player) else { return };
        session.current_sum = if session.is_subtraction { session.start_num } else { 0 };
        session.caught_numbers.clear();
    }

    fn check_win(&mut self) -> bool {
        if self.won {
            return true;
        }
        let coop = self.player2.is_some();
        let tower_blocks = if coop { self.shared_tower } else { self.player1.tower_height };
        if tower_blocks < TOWER_GOAL {
            return false;
        }
        self.won = true;
        log::info!("round won with {tower_blocks} banked blocks");
        self.cues.music_stop();
        self.cues.win();
        self.events.push(GameEvent::Win { mode: self.mode, players: self.players(), tower_blocks });
        true
    }

    /// Set a player's held movement: -1 left, 0 stop, 1 right. Unknown
    /// player numbers are ignored.
    pub fn set_move_dir(&mut self, player: u8, dir: i8) {
        if let Some(session) = self.session_mut(player) {
            session.move_dir = dir.clamp(-1, 1);
        }
    }

    /// Release held movement, but only while it still points in `dir`, so an
    /// opposite key pressed meanwhile wins.
    pub fn clear_move_dir(&mut self, player: u8, dir: i8) {
        if let Some(session) = self.session_mut(player) {
            if session.move_dir == dir.clamp(-1, 1) {
                session.move_dir = 0;
            }
        }
    }

    /// Freeze the round. Every countdown keeps its remaining delay.
    pub fn pause(&mut self) {
        if self.paused || self.won {
            return;
        }
        self.paused = true;
        self.cues.select();
        self.events.push(GameEvent::Paused { paused: true });
    }

    /// Unfreeze; countdowns resume exactly where they stopped.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.events.push(GameEvent::Paused { paused: false });
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Equation line(s) for a player's current problem.
    pub fn equation_text(&self, player: u8) -> String {
        let Some(session) = self.session(player) else {
            return String::new();
        };
        match self.mode {
            GameMode::Arithmetic => {
                if session.caught_numbers.is_empty() {
                    format!("? + ? = {}", session.target_sum)
                } else {
                    let caught = join_plus(&session.caught_numbers);
                    if session.needed() > 0 {
                        format!("{caught} + ?\n= {}", session.target_sum)
                    } else {
                        format!("{caught}\n= {}", session.current_sum)
                    }
                }
            }
            GameMode::Alphabet => {
                format!("{}\n{}", crate::emoji_for_word(session.target_word), session.current_pattern)
            }
        }
    }

    /// Prompt line under the equation.
    pub fn instruction_text(&self, player: u8) -> String {
        let Some(session) = self.session(player) else {
            return String::new();
        };
        match self.mode {
            GameMode::Arithmetic => {
                let needed = session.needed();
                if needed > spawner::MAX_BLOCK_VALUE as i32 {
                    format!("NEED {needed} MORE!")
                } else if needed > 0 {
                    format!("CATCH A {needed}!")
                } else {
                    String::new()
                }
            }
            GameMode::Alphabet => {
                let Some(letter) = session.target_word.chars().next() else {
                    return String::new();
                };
                format!("CATCH THE {letter}! {}", crate::emoji_for_word(session.target_word))
            }
        }
    }

    /// Full render state for the host.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode,
            players: self.players(),
            paused: self.paused,
            won: self.won,
            tower_goal: TOWER_GOAL,
            shared_tower: self.shared_tower,
            tower_labels: self.tower_labels.clone(),
            player1: self.player_view(&self.player1, 1),
            player2: self.player2.as_ref().map(|s| self.player_view(s, 2)),
        }
    }

    fn player_view(&self, session: &PlayerSession, player: u8) -> PlayerView {
        PlayerView {
            catcher_x: session.catcher_x,
            tower_height: session.tower_height,
            tier: session.tier,
            equation: self.equation_text(player),
            instruction: self.instruction_text(player),
            streak: session.streak,
            fall_speed: session.fall_speed,
            spawn_interval_ms: session.spawn_interval_ms,
            blocks: session
                .blocks
                .iter()
                .map(|b| BlockView { id: b.id, x: b.x, y: b.y, label: b.label() })
                .collect(),
        }
    }
}

/// Splash line for a solved problem, built while the catches are still
/// recorded.
fn success_summary(session: &PlayerSession, mode: GameMode) -> String {
    match mode {
        GameMode::Arithmetic => {
            if session.caught_numbers.is_empty() {
                format!("= {} ✓", session.target_sum)
            } else {
                format!("{} = {} ✓", join_plus(&session.caught_numbers), session.target_sum)
            }
        }
        GameMode::Alphabet => {
            let word = session.target_word;
            let first = word.chars().next().map(String::from).unwrap_or_default();
            let rest = session.current_pattern.get(1..).unwrap_or("");
            format!("{first} + {rest} = {word}! {}", crate::emoji_for_word(word))
        }
    }
}

fn join_plus(values: &[u8]) -> String {
    values.iter().map(u8::to_string).collect::<Vec<_>>().join(" + ")
}

/// Select a session by 1-based player number from split borrows.
fn pick<'a>(
    player: u8,
    player1: &'a mut PlayerSession,
    player2: Option<&'a mut PlayerSession>,
) -> Option<&'a mut PlayerSession> {
    match player {
        1 => Some(player1),
        2 => player2,
        _ => None,
    }
}

/// Count down an optional one-shot; true when it just expired.
fn tick_one_shot(slot: &mut Option<f64>, delta_ms: f64) -> bool {
    match slot {
        Some(remaining) => {
            *remaining -= delta_ms;
            if *remaining <= 0.0 {
                *slot = None;
                true
            } else {
                false
            }
        }
        None => false,
    }
}
