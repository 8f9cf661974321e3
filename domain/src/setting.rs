//! Key/value application setting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted setting. Keys are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}
