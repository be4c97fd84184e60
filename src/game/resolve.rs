//! Catch detection and resolution against the active problem.

use super::session::{BlockPayload, FallingBlock, GameMode, PlayerSession};
use super::{BLOCK_SIZE, CATCHER_HEIGHT, CATCHER_WIDTH, CATCHER_Y};

/// Vertical window (px) below the catcher's top edge where a block counts
/// as caught.
pub const CATCH_BAND: f32 = 35.0;

/// What one resolved catch did to the session's problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatchOutcome {
    /// Undershoot; the problem continues.
    Progress,
    Success,
    Failure,
}

/// Hit test for one block against a catcher at `catcher_x`.
pub fn in_catch_zone(block: &FallingBlock, catcher_x: f32) -> bool {
    let catcher_top = CATCHER_Y - CATCHER_HEIGHT / 2.0;
    let block_bottom = block.y + BLOCK_SIZE / 2.0;
    block_bottom >= catcher_top
        && block_bottom <= catcher_top + CATCH_BAND
        && (block.x - catcher_x).abs() < CATCHER_WIDTH / 2.0 + BLOCK_SIZE / 2.0 - 10.0
}

/// Apply a caught payload to the session and classify the result.
pub fn resolve_catch(
    session: &mut PlayerSession,
    mode: GameMode,
    payload: BlockPayload,
) -> CatchOutcome {
    match (mode, payload) {
        (GameMode::Arithmetic, BlockPayload::Number { value }) => {
            session.caught_numbers.push(value);
            if session.is_subtraction {
                session.current_sum = session.current_sum.saturating_sub(value);
            } else {
                session.current_sum += value;
            }
            if session.current_sum == session.target_sum {
                CatchOutcome::Success
            } else if !session.is_subtraction && session.current_sum > session.target_sum {
                CatchOutcome::Failure
            } else if session.is_subtraction && session.current_sum < session.target_sum {
                CatchOutcome::Failure
            } else {
                CatchOutcome::Progress
            }
        }
        (GameMode::Alphabet, BlockPayload::Letter { letter, .. }) => {
            // The formed word must be the shown word. A different valid word
            // still fails; the emoji hint promises one specific answer.
            let rest = session.current_pattern.get(1..).unwrap_or("");
            let formed = format!("{letter}{rest}");
            if formed == session.target_word {
                CatchOutcome::Success
            } else {
                CatchOutcome::Failure
            }
        }
        (mode, payload) => {
            log::debug!("payload {payload:?} does not fit mode {mode:?}");
            CatchOutcome::Progress
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tier::Tier;

    use super::super::session::Lane;
    use super::*;

    fn number_block(x: f32, y: f32) -> FallingBlock {
        FallingBlock { id: 1, x, y, payload: BlockPayload::Number { value: 2 } }
    }

    #[test]
    fn catch_zone_matches_the_vertical_band() {
        // Catcher top edge sits at 708; the band accepts block bottoms
        // through 743.
        let catcher_x = 500.0;
        assert!(!in_catch_zone(&number_block(500.0, 682.9), catcher_x));
        assert!(in_catch_zone(&number_block(500.0, 683.0), catcher_x));
        assert!(in_catch_zone(&number_block(500.0, 718.0), catcher_x));
        assert!(!in_catch_zone(&number_block(500.0, 718.1), catcher_x));
    }

    #[test]
    fn catch_zone_requires_horizontal_overlap() {
        let y = 700.0;
        assert!(in_catch_zone(&number_block(554.9, y), 500.0));
        assert!(!in_catch_zone(&number_block(555.0, y), 500.0));
        assert!(in_catch_zone(&number_block(445.1, y), 500.0));
        assert!(!in_catch_zone(&number_block(445.0, y), 500.0));
    }

    #[test]
    fn exact_sum_succeeds_and_keeps_the_catch_history() {
        let mut session = PlayerSession::new(Tier::Easy, Lane::solo());
        session.target_sum = 6;
        session.current_sum = 4;
        session.caught_numbers = vec![4];
        let outcome =
            resolve_catch(&mut session, GameMode::Arithmetic, BlockPayload::Number { value: 2 });
        assert_eq!(outcome, CatchOutcome::Success);
        assert_eq!(session.current_sum, 6);
        assert_eq!(session.caught_numbers, vec![4, 2]);
    }

    #[test]
    fn overshooting_the_target_fails() {
        let mut session = PlayerSession::new(Tier::Easy, Lane::solo());
        session.target_sum = 6;
        session.current_sum = 5;
        let outcome =
            resolve_catch(&mut session, GameMode::Arithmetic, BlockPayload::Number { value: 3 });
        assert_eq!(outcome, CatchOutcome::Failure);
        assert_eq!(session.current_sum, 8, "the overshoot stays visible until the reset");
    }

    #[test]
    fn undershooting_keeps_the_problem_going() {
        let mut session = PlayerSession::new(Tier::Easy, Lane::solo());
        session.target_sum = 8;
        session.current_sum = 2;
        let outcome =
            resolve_catch(&mut session, GameMode::Arithmetic, BlockPayload::Number { value: 3 });
        assert_eq!(outcome, CatchOutcome::Progress);
        assert_eq!(session.current_sum, 5);
    }

    #[test]
    fn only_the_target_word_completes_a_phonics_problem() {
        let mut session = PlayerSession::new(Tier::Easy, Lane::solo());
        session.current_pattern = "_AT";
        session.target_word = "CAT";
        let catch = |s: &mut PlayerSession, letter| {
            resolve_catch(s, GameMode::Alphabet, BlockPayload::Letter { letter, valid: false })
        };
        // BAT is a real word, just not the one on display.
        assert_eq!(catch(&mut session, 'B'), CatchOutcome::Failure);
        assert_eq!(catch(&mut session, 'Z'), CatchOutcome::Failure);
        assert_eq!(catch(&mut session, 'C'), CatchOutcome::Success);
    }
}
