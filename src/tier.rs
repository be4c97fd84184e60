//! Difficulty tiers and their fixed tuning tables.

use serde::{Deserialize, Serialize};

use crate::words::{self, PhonicsPattern};

/// Coarse difficulty tier. Escalates with tower progress, never backwards.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Tier> {
        match s {
            "easy" => Some(Tier::Easy),
            "medium" => Some(Tier::Medium),
            "hard" => Some(Tier::Hard),
            _ => None,
        }
    }

    pub fn params(self) -> &'static TierParams {
        match self {
            Tier::Easy => &EASY,
            Tier::Medium => &MEDIUM,
            Tier::Hard => &HARD,
        }
    }
}

/// Fixed tuning for one tier. `fall_speed` (px/s) and `spawn_interval_ms`
/// are the tier's nominal pacing; live sessions keep their own evolving
/// copies and only read `max_sum` and `patterns` from here.
#[derive(Debug)]
pub struct TierParams {
    pub max_sum: u8,
    pub fall_speed: f32,
    pub spawn_interval_ms: u32,
    pub patterns: &'static [PhonicsPattern],
}

pub const EASY: TierParams = TierParams {
    max_sum: 5,
    fall_speed: 55.0,
    spawn_interval_ms: 2200,
    patterns: &[words::AT, words::OG, words::UN],
};

pub const MEDIUM: TierParams = TierParams {
    max_sum: 8,
    fall_speed: 70.0,
    spawn_interval_ms: 1900,
    patterns: &[words::AT, words::OG, words::UN, words::AN, words::EN, words::IT],
};

pub const HARD: TierParams = TierParams {
    max_sum: 10,
    fall_speed: 90.0,
    spawn_interval_ms: 1600,
    patterns: &[
        words::AT,
        words::OG,
        words::UN,
        words::AN,
        words::EN,
        words::IT,
        words::OP,
        words::UG,
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_order_easy_to_hard() {
        assert!(Tier::Easy < Tier::Medium);
        assert!(Tier::Medium < Tier::Hard);
        assert_eq!(Tier::default(), Tier::Easy);
    }

    #[test]
    fn names_round_trip() {
        for tier in [Tier::Easy, Tier::Medium, Tier::Hard] {
            assert_eq!(Tier::from_str(tier.as_str()), Some(tier));
        }
        assert_eq!(Tier::from_str("impossible"), None);
    }

    #[test]
    fn harder_tiers_widen_the_problem_space() {
        assert!(EASY.max_sum < MEDIUM.max_sum);
        assert!(MEDIUM.max_sum < HARD.max_sum);
        assert!(EASY.patterns.len() < MEDIUM.patterns.len());
        assert!(MEDIUM.patterns.len() < HARD.patterns.len());
        assert!(EASY.fall_speed < MEDIUM.fall_speed);
        assert!(MEDIUM.fall_speed < HARD.fall_speed);
        assert!(EASY.spawn_interval_ms > MEDIUM.spawn_interval_ms);
        assert!(MEDIUM.spawn_interval_ms > HARD.spawn_interval_ms);
    }
}
