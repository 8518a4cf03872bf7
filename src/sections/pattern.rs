//! Pattern analysis section - detects repetitive and common sequential patterns.

use secrecy::{ExposeSecret, SecretString};

use super::SectionResult;
use crate::weak_words::{LOCALIZED_WEAK_WORDS, is_weak_word};

/// Window length used to match known sequences, and the repetition threshold.
const WINDOW: usize = 4;

const KNOWN_SEQUENCES: &[&str] = &[
    "0123456789",
    "9876543210",
    "abcdefghijklmnopqrstuvwxyz",
    "zyxwvutsrqponmlkjihgfedcba",
    "qwerty",
    "asdfgh",
    "password",
];

/// Kind of weak pattern found in a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonPattern {
    /// Four or more identical consecutive characters.
    Repetition,
    /// A 4-character window of a known run, keyboard row or weak word.
    Sequence,
    /// The whole password is in the loaded weak-word list.
    WeakWord,
}

fn has_repetition(chars: &[char]) -> bool {
    chars
        .windows(WINDOW)
        .any(|w| w.iter().all(|&c| c == w[0]))
}

/// True if `haystack` contains any `WINDOW`-char window of `word`.
/// Words shorter than the window must appear whole.
fn contains_window_of(haystack: &str, word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < WINDOW {
        return haystack.contains(word);
    }
    chars
        .windows(WINDOW)
        .any(|w| haystack.contains(&w.iter().collect::<String>()))
}

/// Runs the common-pattern detector on a raw password.
pub fn detect_common_pattern(password: &str) -> Option<CommonPattern> {
    let chars: Vec<char> = password.chars().collect();
    if has_repetition(&chars) {
        return Some(CommonPattern::Repetition);
    }

    let lower = password.to_lowercase();
    let sequence = KNOWN_SEQUENCES
        .iter()
        .chain(LOCALIZED_WEAK_WORDS)
        .any(|seq| contains_window_of(&lower, seq));
    if sequence {
        return Some(CommonPattern::Sequence);
    }

    if is_weak_word(password) {
        return Some(CommonPattern::WeakWord);
    }
    None
}

/// Analyzes password for repetitive and common sequential patterns.
///
/// # Returns
/// - `Some(reason)` if a problematic pattern was found
/// - `None` otherwise
pub fn pattern_analysis_section(password: &SecretString) -> SectionResult {
    detect_common_pattern(password.expose_secret()).map(|pattern| {
        match pattern {
            CommonPattern::Repetition => "Password contains repetitive patterns",
            CommonPattern::Sequence => "Password contains common sequences",
            CommonPattern::WeakWord => "Password is a commonly used word",
        }
        .to_string()
    })
}
