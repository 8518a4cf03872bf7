//! Theme controller - owns the applied theme and its persistence.

use super::{Theme, ThemeStore};

/// Explicit configuration handed to [`ThemeController::setup`].
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Storage key of the persisted theme.
    pub storage_key: String,
    /// Current `prefers-color-scheme: dark` state.
    pub system_prefers_dark: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            system_prefers_dark: false,
        }
    }
}

/// Applies and persists the theme of one browsing context.
///
/// The stored choice wins over the system preference; a system change is
/// only followed while nothing is stored.
#[derive(Debug)]
pub struct ThemeController<S> {
    config: ThemeConfig,
    store: S,
    current: Theme,
}

impl<S: ThemeStore> ThemeController<S> {
    /// Applies the preferred theme without persisting it.
    pub fn setup(config: ThemeConfig, store: S) -> Self {
        let mut controller = Self {
            current: Theme::default(),
            config,
            store,
        };
        controller.current = controller.preferred();

        #[cfg(feature = "tracing")]
        tracing::debug!(theme = %controller.current, "theme controller set up");

        controller
    }

    /// Returns the store, ending this controller's lifecycle.
    pub fn teardown(self) -> S {
        self.store
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn storage_key(&self) -> &str {
        &self.config.storage_key
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Stored theme, ignoring unreadable storage and unknown values.
    pub fn stored(&self) -> Option<Theme> {
        match self.store.get(&self.config.storage_key) {
            Ok(value) => value.and_then(|v| v.parse().ok()),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("theme storage read failed: {}", _e);
                None
            }
        }
    }

    fn preferred(&self) -> Theme {
        self.stored()
            .unwrap_or_else(|| Theme::from_system(self.config.system_prefers_dark))
    }

    /// Applies and persists `theme`. Storage failures do not block applying.
    pub fn set_theme(&mut self, theme: Theme) -> Theme {
        self.current = theme;
        if let Err(_e) = self.store.set(&self.config.storage_key, theme.as_str()) {
            #[cfg(feature = "tracing")]
            tracing::warn!("theme storage write failed: {}", _e);
        }

        #[cfg(feature = "tracing")]
        tracing::info!(theme = %theme, "theme applied");

        theme
    }

    /// Click on the toggle control.
    pub fn toggle(&mut self) -> Theme {
        self.set_theme(self.current.toggled())
    }

    /// The system color scheme changed.
    pub fn system_preference_changed(&mut self, prefers_dark: bool) -> Theme {
        self.config.system_prefers_dark = prefers_dark;
        if self.stored().is_none() {
            self.current = Theme::from_system(prefers_dark);
        }
        self.current
    }

    /// Adopts a theme written by another context, without writing it back.
    ///
    /// A removed or unknown value falls back to the system preference.
    pub fn apply_external(&mut self, key: &str, value: Option<&str>) -> Option<Theme> {
        if key != self.config.storage_key {
            return None;
        }
        self.current = value
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| Theme::from_system(self.config.system_prefers_dark));
        Some(self.current)
    }

    /// `aria-label` of the toggle control.
    pub fn toggle_aria_label(&self) -> &'static str {
        match self.current {
            Theme::Dark => "Switch to light theme",
            Theme::Light => "Switch to dark theme",
        }
    }

    /// `title` of the toggle control.
    pub fn toggle_title(&self) -> &'static str {
        match self.current {
            Theme::Dark => "Theme: dark",
            Theme::Light => "Theme: light",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::MemoryThemeStore;

    fn dark_system() -> ThemeConfig {
        ThemeConfig {
            system_prefers_dark: true,
            ..ThemeConfig::default()
        }
    }

    #[test]
    fn test_setup_uses_system_preference() {
        let controller = ThemeController::setup(dark_system(), MemoryThemeStore::new());
        assert_eq!(controller.current(), Theme::Dark);
        assert_eq!(controller.stored(), None);
    }

    #[test]
    fn test_stored_theme_wins() {
        let mut store = MemoryThemeStore::new();
        store.set("theme", "light").expect("set");
        let controller = ThemeController::setup(dark_system(), store);
        assert_eq!(controller.current(), Theme::Light);
    }

    #[test]
    fn test_unknown_stored_value_ignored() {
        let mut store = MemoryThemeStore::new();
        store.set("theme", "sepia").expect("set");
        let controller = ThemeController::setup(dark_system(), store);
        assert_eq!(controller.current(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let mut controller =
            ThemeController::setup(ThemeConfig::default(), MemoryThemeStore::new());
        assert_eq!(controller.toggle_aria_label(), "Switch to dark theme");
        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(controller.toggle_title(), "Theme: dark");

        let store = controller.teardown();
        assert_eq!(store.get("theme"), Ok(Some("dark".to_string())));
    }

    #[test]
    fn test_system_change_only_without_stored_choice() {
        let mut controller =
            ThemeController::setup(ThemeConfig::default(), MemoryThemeStore::new());
        assert_eq!(controller.system_preference_changed(true), Theme::Dark);

        controller.set_theme(Theme::Light);
        assert_eq!(controller.system_preference_changed(true), Theme::Light);
    }

    #[test]
    fn test_unavailable_storage_still_applies() {
        let mut controller =
            ThemeController::setup(dark_system(), MemoryThemeStore::unavailable());
        assert_eq!(controller.current(), Theme::Dark);
        assert_eq!(controller.toggle(), Theme::Light);
        assert_eq!(controller.current(), Theme::Light);
    }

    #[test]
    fn test_apply_external() {
        let mut controller = ThemeController::setup(dark_system(), MemoryThemeStore::new());
        assert_eq!(controller.apply_external("other", Some("light")), None);
        assert_eq!(controller.apply_external("theme", Some("light")), Some(Theme::Light));
        assert_eq!(controller.apply_external("theme", None), Some(Theme::Dark));
        // not written back
        assert_eq!(controller.stored(), None);
    }
}
