//! Light/dark theme selection
//!
//! The chosen theme is persisted through a [`ThemeStore`] and, with the
//! `async` feature, propagated to other browsing contexts over a storage bus.

mod controller;
#[cfg(feature = "async")]
mod sync;

pub use controller::{ThemeConfig, ThemeController};
#[cfg(feature = "async")]
pub use sync::{SharedStore, StorageBus, StorageEvent, run_theme_sync};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Unknown theme: {0:?}")]
    InvalidTheme(String),
    #[error("Theme storage is unavailable")]
    StorageUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value of the `data-bs-theme` attribute and of the stored key.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeError::InvalidTheme(other.to_string())),
        }
    }
}

/// Key-value storage holding the persisted theme.
pub trait ThemeStore {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ThemeError>;
}

/// In-process store; `unavailable()` models storage that rejects access.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            unavailable: true,
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
        if self.unavailable {
            return Err(ThemeError::StorageUnavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ThemeError> {
        if self.unavailable {
            return Err(ThemeError::StorageUnavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!(
            "Dark".parse::<Theme>(),
            Err(ThemeError::InvalidTheme("Dark".to_string()))
        );
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryThemeStore::new();
        assert_eq!(store.get("theme"), Ok(None));
        store.set("theme", "dark").expect("set");
        assert_eq!(store.get("theme"), Ok(Some("dark".to_string())));

        let mut broken = MemoryThemeStore::unavailable();
        assert_eq!(broken.set("theme", "dark"), Err(ThemeError::StorageUnavailable));
    }
}
