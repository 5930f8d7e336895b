//! Global rolodir configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{RolodirError, RolodirResult};

static DEFAULT_DATA_DIR: &str = "~/.rolodir";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

/// Global configuration at ~/.config/rolodir/config.toml
///
/// Identity is delegated to an external provider; `user` holds the opaque id
/// of the signed-in user (absent means signed out) and is what `rolodir login`
/// writes.
#[derive(Serialize, Deserialize, Clone)]
pub struct RolodirConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl RolodirConfig {
    pub fn config_path() -> RolodirResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RolodirError::Config("Could not determine config directory".into()))?
            .join("rolodir");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> RolodirResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| RolodirError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RolodirError::Config(e.to_string()))
    }

    /// Save the current config to ~/.config/rolodir/config.toml
    pub fn save(&self) -> RolodirResult<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| RolodirError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| RolodirError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RolodirResult<()> {
        let contents = format!(
            "\
# rolodir configuration

# Where your records live:
# data_dir = \"{}\"

# Signed-in user id (set via `rolodir login`):
# user = \"your-user-id\"

# Server listen port:
# port = 4097
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RolodirError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RolodirError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Where the record-tree snapshot lives.
    pub fn records_path(&self) -> PathBuf {
        self.data_path().join("records.json")
    }
}
