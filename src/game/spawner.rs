//! Spawn decisions: which payload the next falling block carries, if any.

use rand::Rng;

use crate::words;

use super::session::{BlockPayload, GameMode, PlayerSession};

/// Largest value a number block ever shows. Targets exceed it, so every
/// problem takes multiple catches.
pub const MAX_BLOCK_VALUE: u8 = 4;

/// How many correct-letter blocks must be in flight before decoys may spawn.
pub const MIN_CORRECT_LIVE: usize = 2;

/// Pick the next block payload for the session, or `None` when nothing
/// should spawn right now.
pub fn next_payload<R: Rng>(
    session: &PlayerSession,
    mode: GameMode,
    force_correct: bool,
    rng: &mut R,
) -> Option<BlockPayload> {
    match mode {
        GameMode::Arithmetic => {
            let needed = session.needed();
            if needed <= 0 {
                // Target met or overshot, e.g. during the post-fail hold.
                log::debug!("spawn suppressed, needed={needed}");
                return None;
            }
            // Forced spawns take the same draw; capping at what is still
            // needed already keeps every value useful.
            let max_value = (needed as u8).min(MAX_BLOCK_VALUE);
            Some(BlockPayload::Number { value: rng.gen_range(1..=max_value) })
        }
        GameMode::Alphabet => {
            let correct = session.target_word.chars().next()?;
            let live_correct = session
                .blocks
                .iter()
                .filter(|b| matches!(b.payload, BlockPayload::Letter { letter, .. } if letter == correct))
                .count();
            if force_correct || live_correct < MIN_CORRECT_LIVE || rng.gen_bool(0.5) {
                Some(BlockPayload::Letter { letter: correct, valid: true })
            } else {
                let family = words::pattern(session.current_pattern)?;
                let decoy = family.decoys[rng.gen_range(0..family.decoys.len())];
                Some(BlockPayload::Letter { letter: decoy, valid: false })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::tier::Tier;
    use crate::words;

    use super::super::session::{FallingBlock, Lane};
    use super::*;

    fn session() -> PlayerSession {
        PlayerSession::new(Tier::Easy, Lane::solo())
    }

    fn letter_block(id: u64, letter: char, valid: bool) -> FallingBlock {
        FallingBlock { id, x: 200.0, y: 100.0, payload: BlockPayload::Letter { letter, valid } }
    }

    #[test]
    fn number_values_never_exceed_what_is_needed() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let mut s = session();
        s.target_sum = 9;
        for current in 0..9 {
            s.current_sum = current;
            let cap = (9 - current).min(MAX_BLOCK_VALUE);
            for _ in 0..50 {
                match next_payload(&s, GameMode::Arithmetic, false, &mut rng) {
                    Some(BlockPayload::Number { value }) => {
                        assert!((1..=cap).contains(&value), "value {value} with cap {cap}")
                    }
                    other => panic!("expected a number block, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn met_or_overshot_targets_spawn_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut s = session();
        s.target_sum = 6;
        for current in [6, 7, 9] {
            s.current_sum = current;
            assert_eq!(next_payload(&s, GameMode::Arithmetic, false, &mut rng), None);
        }
    }

    #[test]
    fn forced_letter_spawns_are_always_correct() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut s = session();
        s.current_pattern = "_AT";
        s.target_word = "CAT";
        // Plenty of correct blocks live; only the force flag keeps this
        // deterministic.
        s.blocks = vec![letter_block(1, 'C', true), letter_block(2, 'C', true)];
        for _ in 0..50 {
            assert_eq!(
                next_payload(&s, GameMode::Alphabet, true, &mut rng),
                Some(BlockPayload::Letter { letter: 'C', valid: true })
            );
        }
    }

    #[test]
    fn decoys_wait_until_two_correct_letters_fly() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut s = session();
        s.current_pattern = "_AT";
        s.target_word = "CAT";
        for live in 0..2 {
            s.blocks = (0..live).map(|i| letter_block(i, 'C', true)).collect();
            for _ in 0..50 {
                assert_eq!(
                    next_payload(&s, GameMode::Alphabet, false, &mut rng),
                    Some(BlockPayload::Letter { letter: 'C', valid: true })
                );
            }
        }
    }

    #[test]
    fn decoys_come_from_the_family_pool_once_allowed() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let mut s = session();
        s.current_pattern = "_AT";
        s.target_word = "CAT";
        s.blocks = vec![letter_block(1, 'C', true), letter_block(2, 'C', true)];
        let decoys = words::pattern("_AT").unwrap().decoys;
        let mut saw_correct = false;
        let mut saw_decoy = false;
        for _ in 0..200 {
            match next_payload(&s, GameMode::Alphabet, false, &mut rng) {
                Some(BlockPayload::Letter { letter, valid: true }) => {
                    assert_eq!(letter, 'C');
                    saw_correct = true;
                }
                Some(BlockPayload::Letter { letter, valid: false }) => {
                    assert!(decoys.contains(&letter), "unexpected decoy {letter}");
                    saw_decoy = true;
                }
                other => panic!("expected a letter block, got {other:?}"),
            }
        }
        assert!(saw_correct && saw_decoy, "both outcomes should appear over 200 draws");
    }
}
