//! CLI configuration and the file-backed preference store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gradewise_core::theme::{MemoryPreferences, PreferenceStore};
use gradewise_core::wizard::{DEFAULT_ASSIGNMENT_FIELDS, MAX_ASSIGNMENT_FIELDS};

/// Overrides the preference file location.
pub const PREFS_ENV: &str = "GRADEWISE_PREFS";

/// Top-level gradewise configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradewiseConfig {
    /// Number of assignment fields on the form.
    #[serde(default = "default_assignment_fields")]
    pub assignment_fields: usize,
    /// Count the CGPA up when revealing it.
    #[serde(default = "default_animation")]
    pub animation: bool,
    /// Where the theme preference is kept.
    #[serde(default)]
    pub prefs_path: Option<PathBuf>,
}

fn default_assignment_fields() -> usize {
    DEFAULT_ASSIGNMENT_FIELDS
}
fn default_animation() -> bool {
    true
}

impl Default for GradewiseConfig {
    fn default() -> Self {
        Self {
            assignment_fields: default_assignment_fields(),
            animation: default_animation(),
            prefs_path: None,
        }
    }
}

impl GradewiseConfig {
    /// Resolve the preference file: `GRADEWISE_PREFS`, then `prefs_path`,
    /// then `~/.config/gradewise/prefs.toml`.
    pub fn prefs_file(&self) -> Option<PathBuf> {
        self.prefs_file_with(std::env::var_os(PREFS_ENV).map(PathBuf::from))
    }

    fn prefs_file_with(&self, env_override: Option<PathBuf>) -> Option<PathBuf> {
        env_override
            .or_else(|| self.prefs_path.clone())
            .or_else(|| dirs_path().map(|d| d.join("prefs.toml")))
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `gradewise.toml` in the current directory
/// 2. `~/.config/gradewise/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<GradewiseConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradewise.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<GradewiseConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => GradewiseConfig::default(),
    };

    if !(1..=MAX_ASSIGNMENT_FIELDS).contains(&config.assignment_fields) {
        anyhow::bail!(
            "assignment_fields must be between 1 and {MAX_ASSIGNMENT_FIELDS} (got {})",
            config.assignment_fields
        );
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradewise"))
}

/// Preference store backed by a small TOML file of string values.
///
/// The file is rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Open the store. A missing file is an empty store.
    pub fn open(path: PathBuf) -> Result<Self> {
        let values: BTreeMap<String, String> = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read preferences: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse preferences: {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(&self.values).context("failed to serialize preferences")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write preferences: {}", self.path.display()))?;
        Ok(())
    }
}

/// Open the configured preference store, or an in-memory one if no location
/// can be resolved.
pub fn open_preferences(config: &GradewiseConfig) -> Result<Box<dyn PreferenceStore>> {
    match config.prefs_file() {
        Some(path) => Ok(Box::new(FilePreferences::open(path)?)),
        None => {
            tracing::warn!("no preference location, theme changes will not persist");
            Ok(Box::new(MemoryPreferences::new()))
        }
    }
}
