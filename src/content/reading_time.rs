//! Reading time estimation

use serde::{Deserialize, Serialize};

/// Average adult reading speed
pub const DEFAULT_WORDS_PER_MINUTE: f64 = 200.0;

/// Estimated time to read a piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingTime {
    /// Human readable form, e.g. "3 min read"
    pub text: String,
    /// Exact minutes at the configured speed
    pub minutes: f64,
    /// Milliseconds at the configured speed
    pub time: u64,
    /// Counted words (each CJK character is a word)
    pub words: usize,
}

impl ReadingTime {
    /// Estimate at the default speed
    pub fn estimate(text: &str) -> Self {
        ReadingTimeEstimator::default().estimate(text)
    }
}

/// Computes [`ReadingTime`] at a fixed words-per-minute rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingTimeEstimator {
    words_per_minute: f64,
}

impl Default for ReadingTimeEstimator {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

impl ReadingTimeEstimator {
    /// Non-positive or non-finite rates fall back to the default
    pub fn new(words_per_minute: f64) -> Self {
        if words_per_minute.is_finite() && words_per_minute > 0.0 {
            Self { words_per_minute }
        } else {
            Self::default()
        }
    }

    pub fn words_per_minute(&self) -> f64 {
        self.words_per_minute
    }

    pub fn estimate(&self, text: &str) -> ReadingTime {
        let words = count_words(text);
        let minutes = words as f64 / self.words_per_minute;
        let time = (minutes * 60_000.0).round() as u64;
        // Rounded to hundredths before taking the ceiling
        let displayed = ((minutes * 100.0).round() / 100.0).ceil() as u64;

        ReadingTime {
            text: format!("{} min read", displayed),
            minutes,
            time,
            words,
        }
    }
}

/// Count words: runs of non-whitespace containing a letter or digit, plus
/// one word per CJK character
pub fn count_words(text: &str) -> usize {
    let mut words = 0;
    // Whether the current whitespace-delimited run has been counted
    let mut counted = false;

    for c in text.chars() {
        if is_cjk(c) {
            words += 1;
            counted = false;
        } else if c.is_whitespace() {
            counted = false;
        } else if !counted && c.is_alphanumeric() {
            words += 1;
            counted = true;
        }
    }

    words
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'     // Hiragana, Katakana
        | '\u{3400}'..='\u{4DBF}'   // CJK Extension A
        | '\u{4E00}'..='\u{9FFF}'   // CJK Unified Ideographs
        | '\u{AC00}'..='\u{D7AF}'   // Hangul syllables
        | '\u{F900}'..='\u{FAFF}'   // CJK Compatibility Ideographs
        | '\u{20000}'..='\u{2A6DF}' // CJK Extension B
    )
}
