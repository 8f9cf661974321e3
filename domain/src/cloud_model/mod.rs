//! Cloud LLM model registry entities.
//!
//! A [`CloudLlmModel`] holds the provider credentials and endpoint for one
//! remote model account. The chat pipeline only reads these records; they are
//! created and edited through the administration use cases.

use crate::core::error::DomainError;
use crate::core::id::ModelId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered cloud model (Entity)
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudLlmModel {
    pub id: ModelId,
    /// Display name shown in lists.
    pub name: String,
    /// Provider label, e.g. "openai" or "deepseek".
    pub provider: String,
    /// Base URL of the provider API. Empty means the configured default.
    pub endpoint: String,
    /// Secret API key. Never serialized and redacted from `Debug`.
    #[serde(skip_serializing, default)]
    pub api_key: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CloudLlmModel {
    /// API key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let count = self.api_key.chars().count();
        if count <= 4 {
            return "*".repeat(count);
        }
        let tail: String = self.api_key.chars().skip(count - 4).collect();
        format!("{}{}", "*".repeat(count - 4), tail)
    }
}

impl fmt::Debug for CloudLlmModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudLlmModel")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("enabled", &self.enabled)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Validated input for registering a new cloud model.
#[derive(Clone, PartialEq)]
pub struct NewCloudLlmModel {
    name: String,
    provider: String,
    endpoint: String,
    api_key: String,
    enabled: bool,
}

impl NewCloudLlmModel {
    /// Name, provider and API key must be non-empty.
    pub fn new(
        name: impl Into<String>,
        provider: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        let provider = provider.into().trim().to_string();
        let endpoint = endpoint.into().trim().to_string();
        let api_key = api_key.into().trim().to_string();

        if name.is_empty() {
            return Err(DomainError::empty("name"));
        }
        if provider.is_empty() {
            return Err(DomainError::empty("provider"));
        }
        if api_key.is_empty() {
            return Err(DomainError::empty("api_key"));
        }

        Ok(Self {
            name,
            provider,
            endpoint,
            api_key,
            enabled: true,
        })
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

impl fmt::Debug for NewCloudLlmModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewCloudLlmModel")
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("enabled", &self.enabled)
            .finish()
    }
}
