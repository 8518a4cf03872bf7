//! Weak-word management module
//!
//! Holds the built-in localized weak words used by the pattern detector and
//! an optional list loaded from a text file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};
use thiserror::Error;

/// Environment variable naming the weak-word file.
pub const WEAK_WORDS_PATH_ENV: &str = "FORM_ASSIST_WEAK_WORDS_PATH";

const DEFAULT_WEAK_WORDS_PATH: &str = "./assets/weak-words.txt";

/// Built-in weak words (English and Brazilian Portuguese).
///
/// Matched by 4-character windows, like the keyboard and alphabet runs.
pub const LOCALIZED_WEAK_WORDS: &[&str] = &[
    "senha", "admin", "teste", "brasil", "mudar", "welcome", "letmein", "iloveyou",
];

static LOADED_WEAK_WORDS: RwLock<Option<HashSet<String>>> = RwLock::new(None);

#[derive(Error, Debug)]
pub enum WeakWordsError {
    #[error("Weak-word file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read weak-word file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Weak-word file is empty")]
    EmptyFile,
}

fn read_guard() -> RwLockReadGuard<'static, Option<HashSet<String>>> {
    LOADED_WEAK_WORDS.read().unwrap_or_else(|e| e.into_inner())
}

/// Returns the weak-word file path.
///
/// Priority:
/// 1. Environment variable `FORM_ASSIST_WEAK_WORDS_PATH`
/// 2. Default path `./assets/weak-words.txt`
pub fn get_weak_words_path() -> PathBuf {
    std::env::var(WEAK_WORDS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_WEAK_WORDS_PATH))
}

/// Loads the weak-word list from the configured path.
///
/// # Errors
///
/// Returns error if the file does not exist, cannot be read, or is empty.
pub fn init_weak_words() -> Result<usize, WeakWordsError> {
    init_weak_words_from_path(get_weak_words_path())
}

/// Loads the weak-word list from a specific file path.
///
/// One word per line; blank lines are skipped and words are lowercased.
/// Idempotent: once a list is loaded, later calls return its size.
pub fn init_weak_words_from_path<P: AsRef<Path>>(path: P) -> Result<usize, WeakWordsError> {
    if let Some(words) = read_guard().as_ref() {
        return Ok(words.len());
    }

    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Weak-word list initialization FAILED: FileNotFound {:?}", path);
        return Err(WeakWordsError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Weak-word list initialization FAILED: Empty file {:?}", path);
        return Err(WeakWordsError::EmptyFile);
    }

    let set: HashSet<String> = content
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect();

    let count = set.len();
    *LOADED_WEAK_WORDS.write().unwrap_or_else(|e| e.into_inner()) = Some(set);

    #[cfg(feature = "tracing")]
    tracing::info!("Weak-word list initialized: {} words from {:?}", count, path);

    Ok(count)
}

/// Checks whether the whole password is in the loaded list (case-insensitive).
///
/// Returns `false` when no list has been loaded.
pub fn is_weak_word(password: &str) -> bool {
    read_guard()
        .as_ref()
        .is_some_and(|words| words.contains(&password.to_lowercase()))
}

/// Number of loaded words, `None` before initialization.
pub fn loaded_count() -> Option<usize> {
    read_guard().as_ref().map(HashSet::len)
}

#[cfg(test)]
pub fn reset_weak_words_for_testing() {
    *LOADED_WEAK_WORDS.write().unwrap_or_else(|e| e.into_inner()) = None;
}
