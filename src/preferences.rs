//! User preferences persisted next to the history
//!
//! Each preference is stored under its own key as a plain string, so values
//! written by older builds (or by hand) stay readable. Unknown values fall back
//! to the default.

use crate::storage::{FONT_SIZE_KEY, KeyValueStore, OFFLINE_MODE_KEY, THEME_MODE_KEY};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            other => Err(format!("Unknown font size '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("Unknown theme '{}'", other)),
        }
    }
}

/// Font size, offline mode and theme, backed by the key-value store
pub struct Preferences {
    font_size: FontSize,
    offline_mode: bool,
    theme_mode: ThemeMode,
    storage: Arc<dyn KeyValueStore>,
}

impl Preferences {
    /// Read all preferences from `storage`, defaulting anything missing or unreadable
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let read = |key: &str| match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read preference '{}': {}", key, e);
                None
            }
        };

        let font_size = read(FONT_SIZE_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        // Anything but the exact string "true" means online
        let offline_mode = read(OFFLINE_MODE_KEY).as_deref() == Some("true");
        let theme_mode = read(THEME_MODE_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        Self {
            font_size,
            offline_mode,
            theme_mode,
            storage,
        }
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    pub fn offline_mode(&self) -> bool {
        self.offline_mode
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn set_font_size(&mut self, font_size: FontSize) {
        self.font_size = font_size;
        self.write(FONT_SIZE_KEY, font_size.as_str());
    }

    pub fn set_offline_mode(&mut self, offline_mode: bool) {
        self.offline_mode = offline_mode;
        self.write(OFFLINE_MODE_KEY, if offline_mode { "true" } else { "false" });
    }

    pub fn set_theme_mode(&mut self, theme_mode: ThemeMode) {
        self.theme_mode = theme_mode;
        self.write(THEME_MODE_KEY, theme_mode.as_str());
    }

    /// Switch between light and dark, returning the new theme
    pub fn toggle_theme(&mut self) -> ThemeMode {
        let next = self.theme_mode.toggled();
        self.set_theme_mode(next);
        next
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            warn!("Failed to persist preference '{}': {}", key, e);
        }
    }
}

impl fmt::Debug for Preferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preferences")
            .field("font_size", &self.font_size)
            .field("offline_mode", &self.offline_mode)
            .field("theme_mode", &self.theme_mode)
            .finish()
    }
}
