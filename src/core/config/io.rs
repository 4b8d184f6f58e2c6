use crate::core::config::data::{path_display, Config};
use crate::utils::fs::write_atomic;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config at {}: {source}", path_display(path))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config at {}: {source}", path_display(path))]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config at {}: {source}", path_display(path))]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not determine a configuration directory")]
    NoConfigDir,
}

impl Config {
    /// Loads the config at `config_path`; a missing file yields the defaults.
    pub fn load_from_path(config_path: &Path) -> Result<Config, ConfigError> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })
    }

    pub fn save_to_path(&self, config_path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        write_atomic(config_path, &contents).map_err(|source| ConfigError::Write {
            path: config_path.to_path_buf(),
            source,
        })
    }

    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        let proj_dirs = ProjectDirs::from("org", "intl", "intl-preferences")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}
