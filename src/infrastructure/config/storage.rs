//! On-disk configuration file.

use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use directories::ProjectDirs;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Locates, reads and seeds `config.toml`.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Uses the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if no home directory can be found.
    pub fn new() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::with_dir(dirs.config_dir().to_path_buf()))
            .ok_or(ConfigError::NoConfigDir)
    }

    #[must_use]
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the file `load_config` would read.
    #[must_use]
    pub fn config_file(&self, path_override: Option<&Path>) -> PathBuf {
        path_override.map_or_else(|| self.config_dir.join(CONFIG_FILE_NAME), Path::to_path_buf)
    }

    /// Reads the config file. A missing file is seeded with defaults; a
    /// malformed one is left alone and defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read, or if the
    /// default file cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = self.config_file(path_override);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "Writing default config");
                let config = AppConfig::default();
                write_atomic(&path, &config)?;
                return Ok(config);
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        toml::from_str::<AppConfig>(&content).or_else(|e| {
            warn!(path = %path.display(), error = %e, "Malformed config, using defaults");
            Ok(AppConfig::default())
        })
    }
}

fn write_atomic(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let encoded = toml::to_string_pretty(config)?;
    let write_err = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    staged.write_all(encoded.as_bytes()).map_err(write_err)?;
    staged.persist(path).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), bytes = encoded.len(), "Config written");
    Ok(())
}
