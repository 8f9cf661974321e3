//! Raw TOML configuration data types
//!
//! These structs mirror the config file exactly and are deserialized
//! directly. Every field has a default, so an empty file is valid.

mod chat;
mod output;
mod provider;
mod repl;

pub use chat::FileChatConfig;
pub use output::FileOutputConfig;
pub use provider::{DEFAULT_ENDPOINT, FileProviderConfig};
pub use repl::FileReplConfig;

use grove_application::ChatDefaults;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Root for the database and logs; the platform data dir when unset
    pub data_path: Option<PathBuf>,
    /// Log at debug level unless `-v` or `RUST_LOG` says otherwise
    pub debug_mode: bool,
    pub chat: FileChatConfig,
    pub provider: FileProviderConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
}

/// A non-fatal problem found in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Validate the configuration, returning every detected issue.
    ///
    /// Nothing here prevents startup; requests built from a bad value fail
    /// later with a precise error.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.chat.temperature.is_nan() || self.chat.temperature <= 0.0 {
            issues.push(ConfigIssue {
                field: "chat.temperature",
                message: format!(
                    "must be greater than 0 (got {}); requests will be rejected",
                    self.chat.temperature
                ),
            });
        }
        if matches!(self.chat.model_id, Some(id) if id <= 0) {
            issues.push(ConfigIssue {
                field: "chat.model_id",
                message: "must be a positive model id".to_string(),
            });
        }
        if matches!(&self.chat.model_name, Some(name) if name.trim().is_empty()) {
            issues.push(ConfigIssue {
                field: "chat.model_name",
                message: "is empty and will be ignored".to_string(),
            });
        }
        if self.provider.connect_timeout_secs == 0 {
            issues.push(ConfigIssue {
                field: "provider.connect_timeout_secs",
                message: "0 makes every connection attempt time out".to_string(),
            });
        }
        let endpoint = self.provider.default_endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            issues.push(ConfigIssue {
                field: "provider.default_endpoint",
                message: format!("'{endpoint}' is not an http(s) URL"),
            });
        }

        issues
    }

    pub fn chat_defaults(&self) -> ChatDefaults {
        self.chat.to_chat_defaults()
    }
}
