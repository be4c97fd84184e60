// Integration tests for the word-family and emoji datasets.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use emoji_builders::game::adaptive::{
    FALL_SPEED_MAX, FALL_SPEED_MIN, SPAWN_INTERVAL_MAX_MS, SPAWN_INTERVAL_MIN_MS,
};
use emoji_builders::tier::{EASY, HARD, MEDIUM};
use emoji_builders::words::{PATTERNS, PhonicsPattern, pattern};
use emoji_builders::{WORD_EMOJI, emoji_for_word};

#[test]
fn families_are_unique_and_well_formed() {
    let mut seen = HashSet::new();
    for family in PATTERNS {
        assert!(seen.insert(family.pattern), "duplicate family '{}'", family.pattern);
        assert!(family.pattern.starts_with('_'), "family '{}' must lead with the slot", family.pattern);
        assert_eq!(family.pattern.len(), 3, "family '{}' should be the slot plus two letters", family.pattern);
        let rime = family.rime();
        assert!(rime.chars().all(|c| c.is_ascii_uppercase()), "rime '{}' must be uppercase ASCII", rime);
        assert!(!family.valid_words.is_empty(), "family '{}' deals no words", family.pattern);
        for word in family.valid_words {
            assert_eq!(word.len(), 3, "word '{}' in '{}' should be three letters", word, family.pattern);
            assert!(word.chars().all(|c| c.is_ascii_uppercase()), "word '{}' must be uppercase ASCII", word);
            assert!(word.ends_with(rime), "word '{}' does not complete '{}'", word, family.pattern);
        }
        // Distinct first letters keep every catch unambiguous.
        let firsts: HashSet<char> =
            family.valid_words.iter().filter_map(|w| w.chars().next()).collect();
        assert_eq!(
            firsts.len(),
            family.valid_words.len(),
            "family '{}' repeats a first letter",
            family.pattern
        );
    }
}

#[test]
fn decoys_never_complete_a_listed_word() {
    for family in PATTERNS {
        assert!(!family.decoys.is_empty(), "family '{}' has no decoys", family.pattern);
        for decoy in family.decoys {
            let formed = format!("{}{}", decoy, family.rime());
            assert!(
                !family.valid_words.contains(&formed.as_str()),
                "decoy '{}' forms listed word '{}' in '{}'",
                decoy,
                formed,
                family.pattern
            );
        }
    }
}

#[test]
fn every_dealt_word_has_an_emoji() {
    for family in PATTERNS {
        for word in family.valid_words {
            assert_ne!(emoji_for_word(word), "❓", "word '{}' is missing an emoji", word);
        }
    }
}

#[test]
fn emoji_words_are_unique_and_lookup_ignores_case() {
    let mut seen = HashSet::new();
    for (word, emoji) in WORD_EMOJI {
        assert!(seen.insert(*word), "duplicate word '{}' in WORD_EMOJI", word);
        assert!(!emoji.is_empty(), "empty emoji for word '{}'", word);
    }
    assert_eq!(emoji_for_word("cat"), emoji_for_word("CAT"));
    assert_eq!(emoji_for_word("XYZZY"), "❓");
}

#[test]
fn tier_pools_grow_and_stay_inside_the_dataset() {
    for params in [&EASY, &MEDIUM, &HARD] {
        for family in params.patterns {
            assert!(
                pattern(family.pattern).is_some(),
                "tier references unknown family '{}'",
                family.pattern
            );
        }
    }
    let names = |pool: &'static [PhonicsPattern]| -> HashSet<&str> {
        pool.iter().map(|f| f.pattern).collect()
    };
    // Each step up keeps everything the previous tier dealt.
    assert!(names(EASY.patterns).is_subset(&names(MEDIUM.patterns)));
    assert!(names(MEDIUM.patterns).is_subset(&names(HARD.patterns)));
}

#[test]
fn tier_pacing_sits_inside_the_adaptive_clamps() {
    for params in [&EASY, &MEDIUM, &HARD] {
        assert!(
            (FALL_SPEED_MIN..=FALL_SPEED_MAX).contains(&params.fall_speed),
            "fall speed {} outside the clamp range",
            params.fall_speed
        );
        assert!(
            (SPAWN_INTERVAL_MIN_MS..=SPAWN_INTERVAL_MAX_MS).contains(&params.spawn_interval_ms),
            "spawn interval {} outside the clamp range",
            params.spawn_interval_ms
        );
    }
}
