//! Configuration loading for grove
//!
//! Handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GROVE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./grove.toml` or `./.grove.toml`
//! 4. Global: `<config dir>/grove/config.toml`
//! 5. Default values

mod error;
mod file_config;
mod loader;
mod paths;

pub use error::ConfigError;
pub use file_config::{
    ConfigIssue, DEFAULT_ENDPOINT, FileChatConfig, FileConfig, FileOutputConfig,
    FileProviderConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
pub use paths::DataPaths;
