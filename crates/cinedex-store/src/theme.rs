//! Persisted colour theme.

use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::kv::KeyValueStore;

/// Storage key for the theme document.
pub const THEME_KEY: &str = "theme-storage";

/// UI colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background.
    #[default]
    Dark,
}

impl Theme {
    /// Returns the other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeDocument {
    #[serde(default)]
    theme: Theme,
}

/// Current theme, written through to a [`KeyValueStore`].
#[derive(Debug)]
pub struct ThemeStore<S> {
    store: S,
    theme: Theme,
}

impl<S: KeyValueStore> ThemeStore<S> {
    /// Loads the stored theme, defaulting to [`Theme::Dark`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the stored JSON is malformed.
    pub fn load(store: S) -> Result<Self> {
        let theme = match store.get(THEME_KEY)? {
            Some(raw) => {
                serde_json::from_str::<ThemeDocument>(&raw)
                    .with_context(|| format!("malformed {THEME_KEY} document"))?
                    .theme
            }
            None => Theme::default(),
        };
        Ok(Self { store, theme })
    }

    /// Current theme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips the theme and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the new theme cannot be persisted.
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }

    /// Persists `theme`, then makes it current.
    ///
    /// # Errors
    ///
    /// Returns an error if the theme cannot be persisted.
    pub fn set(&mut self, theme: Theme) -> Result<()> {
        let raw = serde_json::to_string(&ThemeDocument { theme })
            .context("failed to encode theme")?;
        self.store.set(THEME_KEY, &raw)?;
        self.theme = theme;
        tracing::debug!(%theme, "theme updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::kv::{MemoryStore, SqliteStore};

    #[test]
    fn test_default_is_dark() {
        // Arrange
        let backend = MemoryStore::new();

        // Act
        let store = ThemeStore::load(&backend).unwrap();

        // Assert
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_writes_document() {
        // Arrange
        let backend = MemoryStore::new();
        let mut store = ThemeStore::load(&backend).unwrap();

        // Act
        let next = store.toggle().unwrap();

        // Assert
        assert_eq!(next, Theme::Light);
        assert_eq!(
            backend.get(THEME_KEY).unwrap().as_deref(),
            Some(r#"{"theme":"light"}"#)
        );
        assert_eq!(store.toggle().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_set_survives_reopen() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        ThemeStore::load(SqliteStore::open(Some(&dir_path)).unwrap())
            .unwrap()
            .set(Theme::Light)
            .unwrap();

        // Act
        let reopened = ThemeStore::load(SqliteStore::open(Some(&dir_path)).unwrap()).unwrap();

        // Assert
        assert_eq!(reopened.theme(), Theme::Light);
    }

    #[test]
    fn test_unknown_theme_is_error() {
        // Arrange
        let backend = MemoryStore::new();
        backend.set(THEME_KEY, r#"{"theme":"sepia"}"#).unwrap();

        // Act
        let result = ThemeStore::load(&backend);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Theme::Light.to_string(), "light");
        assert_eq!(Theme::Dark.to_string(), "dark");
    }
}
