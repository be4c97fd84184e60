//! Problem generation: a fresh target for a new or just-solved round.

use rand::Rng;

use super::session::{GameMode, PlayerSession};

/// Roll the session's next problem from its current tier.
pub fn start_new_problem<R: Rng>(session: &mut PlayerSession, mode: GameMode, rng: &mut R) {
    session.caught_numbers.clear();
    match mode {
        GameMode::Arithmetic => {
            // Addition only. Targets start at 5 so no single block solves
            // the problem outright.
            session.is_subtraction = false;
            session.start_num = 0;
            session.current_sum = 0;
            let hi = (session.tier.params().max_sum + 2).min(10);
            session.target_sum = rng.gen_range(5..=hi);
        }
        GameMode::Alphabet => {
            let patterns = session.tier.params().patterns;
            let family = &patterns[rng.gen_range(0..patterns.len())];
            session.current_pattern = family.pattern;
            session.valid_words = family.valid_words;
            session.target_word = family.valid_words[rng.gen_range(0..family.valid_words.len())];
        }
    }
}
