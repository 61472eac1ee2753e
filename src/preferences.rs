//! Display preferences persisted next to the journal.
//!
//! Each flag is its own small record so it can change without touching the
//! entry collection.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::{JournalError, Result};
use crate::storage::BlobStore;

/// Storage key of the explicit theme choice
pub const THEME_PREFERENCE_KEY: &str = "@theme_preference";
/// Storage key of the "follow the system theme" flag
pub const USE_SYSTEM_THEME_KEY: &str = "@use_system_theme";
/// Storage key of the large-text flag
pub const LARGE_TEXT_PREFERENCE_KEY: &str = "@large_text_preference";

/// Text scale with large text off
pub const FONT_SCALE_NORMAL: f32 = 1.0;
/// Text scale with large text on
pub const FONT_SCALE_LARGE: f32 = 1.5;

/// Light or dark colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreference {
    /// Light scheme
    Light,
    /// Dark scheme
    Dark,
}

impl ThemePreference {
    /// Stored name of the theme
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(JournalError::InvalidInput(format!("Unknown theme: {other}"))),
        }
    }
}

/// User display preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    /// Explicit theme, if one was ever chosen
    pub theme: Option<ThemePreference>,
    /// Follow the system theme instead of `theme`
    pub use_system_theme: bool,
    /// Scale text up
    pub large_text: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: None,
            use_system_theme: true,
            large_text: false,
        }
    }
}

impl Preferences {
    /// Read preferences; missing or unreadable records keep their defaults
    pub async fn load<B: BlobStore + ?Sized>(store: &B) -> Result<Self> {
        let mut preferences = Self::default();

        if let Some(raw) = store.get_item(THEME_PREFERENCE_KEY).await? {
            match raw.parse() {
                Ok(theme) => preferences.theme = Some(theme),
                Err(_) => warn!(value = %raw, "Ignoring unknown stored theme"),
            }
        }
        if let Some(raw) = store.get_item(USE_SYSTEM_THEME_KEY).await? {
            preferences.use_system_theme = raw == "true";
        }
        if let Some(raw) = store.get_item(LARGE_TEXT_PREFERENCE_KEY).await? {
            preferences.large_text = raw == "true";
        }

        Ok(preferences)
    }

    /// Persist every flag; the theme record is only written once chosen
    pub async fn save<B: BlobStore + ?Sized>(&self, store: &B) -> Result<()> {
        store
            .set_item(USE_SYSTEM_THEME_KEY, &self.use_system_theme.to_string())
            .await?;
        if let Some(theme) = self.theme {
            store.set_item(THEME_PREFERENCE_KEY, theme.as_str()).await?;
        }
        store
            .set_item(LARGE_TEXT_PREFERENCE_KEY, &self.large_text.to_string())
            .await?;
        Ok(())
    }

    /// Theme in effect given what the system currently reports
    #[must_use]
    pub fn active_theme(&self, system: ThemePreference) -> ThemePreference {
        if self.use_system_theme {
            system
        } else {
            self.theme.unwrap_or(ThemePreference::Light)
        }
    }

    /// Overwrite the flags that were given, leaving the rest untouched
    pub fn apply(&mut self, theme: Option<ThemePreference>, use_system_theme: Option<bool>, large_text: Option<bool>) {
        if let Some(theme) = theme {
            self.theme = Some(theme);
        }
        if let Some(flag) = use_system_theme {
            self.use_system_theme = flag;
        }
        if let Some(flag) = large_text {
            self.large_text = flag;
        }
    }

    /// Switch to an explicit theme opposite to the active one
    pub fn toggle_theme(&mut self, system: ThemePreference) {
        self.theme = Some(self.active_theme(system).toggled());
        self.use_system_theme = false;
    }

    /// Text scale factor
    #[must_use]
    pub const fn font_scale(&self) -> f32 {
        if self.large_text {
            FONT_SCALE_LARGE
        } else {
            FONT_SCALE_NORMAL
        }
    }
}
