//! Global postcal configuration.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use ::config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::{PostcalError, PostcalResult};

static DEFAULT_DATA_DIR: &str = "~/.postcal";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_first_day() -> Weekday {
    Weekday::Sun
}

/// Configuration at ~/.config/postcal/config.toml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PostcalConfig {
    /// Where the post data is saved.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Weekday the month grid starts on.
    #[serde(default = "default_first_day")]
    pub first_day_of_week: Weekday,
}

impl Default for PostcalConfig {
    fn default() -> Self {
        PostcalConfig {
            data_dir: default_data_dir(),
            first_day_of_week: default_first_day(),
        }
    }
}

impl PostcalConfig {
    pub fn config_path() -> PostcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PostcalError::Config("Could not determine config directory".into()))?
            .join("postcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file first if
    /// none exists yet.
    pub fn load() -> PostcalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> PostcalResult<Self> {
        log::debug!("Reading config from {}", path.display());

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .map_err(|e| PostcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PostcalError::Config(e.to_string()))
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PostcalResult<()> {
        let contents = format!(
            "\
# postcal configuration

# Where your posts are saved:
# data_dir = \"{}\"

# First column of the month grid (Mon, Tue, ... Sun):
# first_day_of_week = \"Sun\"
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PostcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PostcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
