//! On-disk locations derived from `data_path`.

use super::error::ConfigError;
use super::file_config::FileConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved data directory layout.
///
/// ```text
/// <root>/data/grove.db
/// <root>/logs/grove.log.<date>
/// <root>/history.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Use the configured `data_path`, falling back to `<data dir>/grove`.
    pub fn resolve(config: &FileConfig) -> Result<Self, ConfigError> {
        match &config.data_path {
            Some(path) => Ok(Self::new(path)),
            None => dirs::data_dir()
                .map(|dir| Self::new(dir.join("grove")))
                .ok_or(ConfigError::NoDataDir),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn database(&self) -> PathBuf {
        self.root.join("data").join("grove.db")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Line history for the interactive chat.
    pub fn history_file(&self) -> PathBuf {
        self.root.join("history.txt")
    }

    /// Create the database and log directories.
    pub fn ensure(&self) -> Result<(), ConfigError> {
        for dir in [self.root.join("data"), self.logs_dir()] {
            fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir { path: dir, source })?;
        }
        Ok(())
    }
}
