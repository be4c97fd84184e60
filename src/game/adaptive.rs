//! Per-outcome pacing adjustment and tier escalation.

use crate::tier::Tier;

use super::session::PlayerSession;

pub const FALL_SPEED_MIN: f32 = 50.0;
pub const FALL_SPEED_MAX: f32 = 200.0;
pub const SPAWN_INTERVAL_MIN_MS: u32 = 600;
pub const SPAWN_INTERVAL_MAX_MS: u32 = 2500;

/// Tower heights at which the tier steps up.
pub const MEDIUM_AT_TOWER: u32 = 2;
pub const HARD_AT_TOWER: u32 = 4;

/// React to the latest outcome: nudge fall speed and spawn interval by the
/// streak bracket, clamp both, escalate the tier from tower progress, and
/// reissue the spawn schedule at the new interval.
pub fn update_pacing(session: &mut PlayerSession) {
    let Some(&last_success) = session.recent_results.back() else {
        return;
    };

    let (speed_step, interval_step): (f32, i64) = if last_success {
        if session.streak >= 3 {
            (25.0, -200)
        } else if session.streak >= 2 {
            (15.0, -100)
        } else {
            (8.0, -50)
        }
    } else if session.streak <= -2 {
        (-40.0, 400)
    } else {
        (-25.0, 250)
    };

    session.fall_speed = (session.fall_speed + speed_step).clamp(FALL_SPEED_MIN, FALL_SPEED_MAX);
    session.spawn_interval_ms = (session.spawn_interval_ms as i64 + interval_step)
        .clamp(SPAWN_INTERVAL_MIN_MS as i64, SPAWN_INTERVAL_MAX_MS as i64)
        as u32;

    // The tier follows the tower and never steps back down.
    let from_tower = if session.tower_height >= HARD_AT_TOWER {
        Tier::Hard
    } else if session.tower_height >= MEDIUM_AT_TOWER {
        Tier::Medium
    } else {
        Tier::Easy
    };
    session.tier = session.tier.max(from_tower);

    session.spawn_timer.restart(session.spawn_interval_ms);
}
