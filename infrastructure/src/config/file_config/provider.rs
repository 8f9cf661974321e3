//! Provider transport settings from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Raw provider configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL used for models registered without an endpoint
    pub default_endpoint: String,
    pub connect_timeout_secs: u64,
    /// Overrides the `grove/<version>` user agent
    pub user_agent: Option<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            default_endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: 30,
            user_agent: None,
        }
    }
}
