//! Driver settings file
//!
//! Optional TOML file holding defaults for the global flags:
//!
//! ```toml
//! log-level = "info"
//! log-format = "ext"
//! log-file = "/tmp/greeter.log"
//! color = true
//! config = "/etc/greeter/greeting.conf"
//! ```
//!
//! An explicitly named file must exist. Otherwise the default location under
//! the user config directory is used when present.

use crate::core::error_handling::ContextualError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub color: Option<bool>,
    pub config: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{message}")]
    Missing { path: PathBuf, message: String },

    #[error("Error reading settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    Parse { path: PathBuf, message: String },
}

impl ContextualError for SettingsError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, SettingsError::Read { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            SettingsError::Missing { message, .. } | SettingsError::Parse { message, .. } => {
                Some(message.as_str())
            }
            SettingsError::Read { .. } => None,
        }
    }
}

impl Settings {
    /// `<config dir>/Greeter/greeter.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Greeter").join("greeter.toml"))
    }

    /// Parse settings from TOML text
    pub fn from_toml(contents: &str, origin: &Path) -> Result<Self, SettingsError> {
        toml::from_str(contents).map_err(|e| SettingsError::Parse {
            path: origin.to_path_buf(),
            message: format!("Error parsing settings file {}: {}", origin.display(), e),
        })
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&contents, path)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load the explicit settings file, else the default one if it exists, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        match explicit {
            Some(path) if !path.exists() => Err(SettingsError::Missing {
                path: path.to_path_buf(),
                message: format!(
                    "The specified settings file does not exist: {}",
                    path.display()
                ),
            }),
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }
}
