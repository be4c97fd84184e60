//! Phonics word-family dataset for alphabet mode.
//!
//! Each family is a two-letter rime behind a leading slot marker (`_AT`).
//! `valid_words` are the three-letter words formed by filling the slot with a
//! first letter; `decoys` are letters guaranteed to form nonsense instead.

/// One word family: the rime, the words that complete it, and the letters
/// that never do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhonicsPattern {
    pub pattern: &'static str,
    pub valid_words: &'static [&'static str],
    pub decoys: &'static [char],
}

impl PhonicsPattern {
    /// The rime without the slot marker (`"AT"` for `"_AT"`).
    pub fn rime(&self) -> &'static str {
        &self.pattern[1..]
    }
}

pub const AT: PhonicsPattern = PhonicsPattern {
    pattern: "_AT",
    valid_words: &["CAT", "BAT", "HAT", "MAT", "RAT", "SAT", "PAT", "FAT"],
    decoys: &['Z', 'Q', 'X', 'V'],
};

pub const OG: PhonicsPattern = PhonicsPattern {
    pattern: "_OG",
    valid_words: &["DOG", "LOG", "FOG", "HOG", "JOG", "BOG"],
    decoys: &['Z', 'Q', 'X', 'V'],
};

pub const UN: PhonicsPattern = PhonicsPattern {
    pattern: "_UN",
    valid_words: &["SUN", "RUN", "FUN", "BUN", "GUN", "PUN"],
    decoys: &['Z', 'Q', 'X', 'V'],
};

// 'V' would form VAN here, so the decoy pool is one shorter.
pub const AN: PhonicsPattern = PhonicsPattern {
    pattern: "_AN",
    valid_words: &["CAN", "MAN", "PAN", "FAN", "RAN", "TAN", "VAN"],
    decoys: &['Z', 'Q', 'X'],
};

pub const EN: PhonicsPattern = PhonicsPattern {
    pattern: "_EN",
    valid_words: &["HEN", "PEN", "TEN", "MEN", "DEN", "BEN"],
    decoys: &['Z', 'Q', 'X', 'V'],
};

pub const IT: PhonicsPattern = PhonicsPattern {
    pattern: "_IT",
    valid_words: &["SIT", "HIT", "BIT", "FIT", "KIT", "PIT"],
    decoys: &['Z', 'Q', 'X', 'V'],
};

pub const OP: PhonicsPattern = PhonicsPattern {
    pattern: "_OP",
    valid_words: &["TOP", "HOP", "MOP", "POP", "COP"],
    decoys: &['Z', 'Q', 'X', 'V'],
};

pub const UG: PhonicsPattern = PhonicsPattern {
    pattern: "_UG",
    valid_words: &["BUG", "HUG", "MUG", "RUG", "TUG", "JUG"],
    decoys: &['Z', 'Q', 'X', 'V'],
};

pub const OT: PhonicsPattern = PhonicsPattern {
    pattern: "_OT",
    valid_words: &["HOT", "POT", "DOT", "COT", "GOT", "NOT"],
    decoys: &['Z', 'Q', 'X', 'V'],
};

pub const ED: PhonicsPattern = PhonicsPattern {
    pattern: "_ED",
    valid_words: &["BED", "RED", "FED", "LED"],
    decoys: &['Z', 'Q', 'X', 'V'],
};

/// Every family, including `_OT` and `_ED` which no tier currently deals.
pub const PATTERNS: &[PhonicsPattern] = &[AT, OG, UN, AN, EN, IT, OP, UG, OT, ED];

/// Family lookup by slot string (`"_AT"`). The table is tiny; linear scan.
pub fn pattern(slot: &str) -> Option<&'static PhonicsPattern> {
    PATTERNS.iter().find(|p| p.pattern == slot)
}
