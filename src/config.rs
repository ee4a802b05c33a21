//! Navigator configuration with builder pattern
//!
//! Settings can be built in code, taken from a preset, or read from a TOML file such as:
//!
//! ```toml
//! animations = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration shared by the page and popup services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigatorConfig {
    /// Global switch; a transition is animated only if requested and this is on
    pub animations: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self { animations: true }
    }
}

impl NavigatorConfig {
    pub fn builder() -> NavigatorConfigBuilder {
        NavigatorConfigBuilder::new()
    }

    /// No animations, for tests and headless runs
    pub fn headless() -> Self {
        Self { animations: false }
    }

    /// Effective animate flag for a request
    pub fn animate(&self, requested: bool) -> bool {
        requested && self.animations
    }

    /// Default config file location
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("viewstack")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".viewstack")
        };
        Ok(config_dir.join("navigator.toml"))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse navigator config")
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        log::debug!("Loading navigator config from: {:?}", path);
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Load `path`, or the default location; missing files fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if path.exists() {
            Self::load_from_file(&path)
        } else {
            log::info!("No navigator config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}

/// Builder for [`NavigatorConfig`]
#[derive(Debug, Clone, Default)]
pub struct NavigatorConfigBuilder {
    config: NavigatorConfig,
}

impl NavigatorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animations(mut self, enabled: bool) -> Self {
        self.config.animations = enabled;
        self
    }

    pub fn build(self) -> NavigatorConfig {
        self.config
    }
}
