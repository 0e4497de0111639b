//! Shell configuration.
//!
//! The only setting is the working directory every file argument is resolved
//! against. It can come from a TOML file, an environment variable, or the
//! command line, and falls back to the process's current directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{FshError, Result};

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV: &str = "FSH_CONFIG";

/// Environment variable overriding the working directory.
pub const CURRENT_DIRECTORY_ENV: &str = "FSH_CURRENT_DIRECTORY";

/// Config file looked up in the process directory when `FSH_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "fsh.toml";

/// Top-level configuration (`fsh.toml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FshConfig {
    /// Base directory for all relative file arguments.
    #[serde(default)]
    pub current_directory: Option<PathBuf>,
}

impl FshConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FshError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Build the configuration from the process environment.
    ///
    /// Reads `FSH_CONFIG` (or `fsh.toml` if it exists) and then applies
    /// `FSH_CURRENT_DIRECTORY` on top.
    pub fn discover() -> Result<Self> {
        let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from).or_else(|| {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        });
        let dir_override = std::env::var_os(CURRENT_DIRECTORY_ENV).map(PathBuf::from);
        Self::discover_from(config_path.as_deref(), dir_override)
    }

    /// Environment-free core of [`FshConfig::discover`].
    pub fn discover_from(config_path: Option<&Path>, dir_override: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::load(path)?
            },
            None => Self::default(),
        };
        Ok(config.with_directory(dir_override))
    }

    /// Replace the configured directory when `dir` is `Some`.
    pub fn with_directory(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir.filter(|d| !d.as_os_str().is_empty()) {
            self.current_directory = Some(dir);
        }
        self
    }

    /// Resolve the working directory, defaulting to the process directory.
    ///
    /// A configured path that is not an existing directory is an error.
    pub fn working_directory(&self) -> Result<PathBuf> {
        match &self.current_directory {
            Some(dir) if dir.is_dir() => Ok(dir.clone()),
            Some(dir) => Err(FshError::Config(format!(
                "working directory '{}' does not exist",
                dir.display()
            ))),
            None => Ok(std::env::current_dir()?),
        }
    }
}
