use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or preparing the data directory
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(#[source] Box<figment::Error>),

    #[error("No platform data directory; set data_path in the config")]
    NoDataDir,

    #[error("Failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Invalid(Box::new(e))
    }
}
