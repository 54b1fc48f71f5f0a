//! Entropy-based password strength estimation
//!
//! A coarse heuristic for user feedback. It never decides whether a
//! password is acceptable for sealing.

use std::fmt;

const LOWERCASE_ALPHABET: u32 = 26;
const UPPERCASE_ALPHABET: u32 = 26;
const DIGIT_ALPHABET: u32 = 10;
const SYMBOL_ALPHABET: u32 = 32;

/// Characters counted as symbols. Anything else outside letters and
/// digits (space, backtick, tilde, non-ASCII) adds no alphabet.
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>?/";

/// Passwords shorter than this are weak regardless of entropy.
pub const MIN_LENGTH: usize = 6;

const WEAK_BELOW_BITS: f64 = 30.0;
const FAIR_BELOW_BITS: f64 = 50.0;
const FAIR_MAX_CLASSES: u8 = 3;
const GOOD_BELOW_BITS: f64 = 60.0;

/// Qualitative strength, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthBucket {
    /// No password at all.
    Empty,
    /// Shorter than [`MIN_LENGTH`] or under 30 bits.
    Weak,
    /// Under 50 bits using fewer than three character classes.
    Fair,
    /// Under 60 bits.
    Good,
    /// 60 bits or more.
    Strong,
}

impl StrengthBucket {
    /// Meter score from 0 (empty) to 4 (strong).
    pub fn score(self) -> u8 {
        match self {
            StrengthBucket::Empty => 0,
            StrengthBucket::Weak => 1,
            StrengthBucket::Fair => 2,
            StrengthBucket::Good => 3,
            StrengthBucket::Strong => 4,
        }
    }

    /// Lowercase name of the bucket, e.g. `"fair"`.
    pub fn as_str(self) -> &'static str {
        match self {
            StrengthBucket::Empty => "empty",
            StrengthBucket::Weak => "weak",
            StrengthBucket::Fair => "fair",
            StrengthBucket::Good => "good",
            StrengthBucket::Strong => "strong",
        }
    }
}

impl fmt::Display for StrengthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`assess`]. Recomputed from scratch for every password.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthAssessment {
    /// `length * log2(charset_size)`, with the charset floored to 1.
    pub entropy_bits: f64,
    /// Qualitative bucket; see [`StrengthBucket`] for the thresholds.
    pub bucket: StrengthBucket,
    /// Sum of the alphabet sizes of the classes present; 0 if none.
    pub charset_size: u32,
    /// Length in UTF-16 code units, so a character outside the Basic
    /// Multilingual Plane (e.g. most emoji) counts as two.
    pub length: usize,
    /// Number of distinct classes present (0..=4).
    pub classes: u8,
}

impl StrengthAssessment {
    /// Human-readable label for a strength meter.
    pub fn label(&self) -> &'static str {
        match self.bucket {
            StrengthBucket::Empty => "No password",
            StrengthBucket::Weak if self.length < MIN_LENGTH => "Too short",
            StrengthBucket::Weak => "Weak",
            StrengthBucket::Fair => "Fair",
            StrengthBucket::Good => "Good",
            StrengthBucket::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.0} bits)", self.label(), self.entropy_bits)
    }
}

#[derive(Default)]
struct Classes {
    lower: bool,
    upper: bool,
    digit: bool,
    symbol: bool,
}

impl Classes {
    fn of(password: &str) -> Self {
        let mut classes = Classes::default();
        for c in password.chars() {
            if c.is_ascii_lowercase() {
                classes.lower = true;
            } else if c.is_ascii_uppercase() {
                classes.upper = true;
            } else if c.is_ascii_digit() {
                classes.digit = true;
            } else if SYMBOLS.contains(c) {
                classes.symbol = true;
            }
        }
        classes
    }

    fn count(&self) -> u8 {
        [self.lower, self.upper, self.digit, self.symbol]
            .iter()
            .filter(|present| **present)
            .count() as u8
    }

    fn charset_size(&self) -> u32 {
        let mut size = 0;
        if self.lower {
            size += LOWERCASE_ALPHABET;
        }
        if self.upper {
            size += UPPERCASE_ALPHABET;
        }
        if self.digit {
            size += DIGIT_ALPHABET;
        }
        if self.symbol {
            size += SYMBOL_ALPHABET;
        }
        size
    }
}

/// Estimate the strength of `password`.
pub fn assess(password: &str) -> StrengthAssessment {
    let classes = Classes::of(password);
    let charset_size = classes.charset_size();
    let length = password.encode_utf16().count();
    let entropy_bits = length as f64 * f64::from(charset_size.max(1)).log2();
    let class_count = classes.count();

    let bucket = if length == 0 {
        StrengthBucket::Empty
    } else if length < MIN_LENGTH || entropy_bits < WEAK_BELOW_BITS {
        StrengthBucket::Weak
    } else if entropy_bits < FAIR_BELOW_BITS && class_count < FAIR_MAX_CLASSES {
        StrengthBucket::Fair
    } else if entropy_bits < GOOD_BELOW_BITS {
        StrengthBucket::Good
    } else {
        StrengthBucket::Strong
    };

    StrengthAssessment {
        entropy_bits,
        bucket,
        charset_size,
        length,
        classes: class_count,
    }
}
