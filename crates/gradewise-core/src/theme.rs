//! The persisted UI theme flag.
//!
//! This is the only state that outlives a session. It lives in a key-value
//! [`PreferenceStore`] under [`THEME_KEY`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Key the theme is stored under.
pub const THEME_KEY: &str = "theme";

/// Process-wide string key-value store.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preference store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Read the stored theme. Missing or unknown values fall back to dark.
    pub fn load(store: &dyn PreferenceStore) -> Theme {
        store
            .get(THEME_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn save(self, store: &mut dyn PreferenceStore) -> Result<()> {
        store.set(THEME_KEY, &self.to_string())
    }

    /// Flip the stored theme and return the new value.
    pub fn toggle(store: &mut dyn PreferenceStore) -> Result<Theme> {
        let next = Theme::load(store).toggled();
        next.save(store)?;
        tracing::debug!(theme = %next, "theme toggled");
        Ok(next)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}
