//! Key/value settings.

use crate::ports::storage::SettingRepository;
use crate::use_cases::shared::AdminError;
use grove_domain::Setting;
use std::sync::Arc;
use tracing::debug;

/// Use case for reading and writing settings.
#[derive(Clone)]
pub struct ManageSettingsUseCase {
    repo: Arc<dyn SettingRepository>,
}

impl ManageSettingsUseCase {
    pub fn new(repo: Arc<dyn SettingRepository>) -> Self {
        Self { repo }
    }

    /// Value for `key`, or `None` if it was never set.
    pub async fn get(&self, key: &str) -> Result<Option<String>, AdminError> {
        let key = validate_key(key)?;
        Ok(self.repo.get_setting(key).await?.map(|s| s.value))
    }

    /// Insert or overwrite `key`.
    pub async fn set(&self, key: &str, value: &str) -> Result<Setting, AdminError> {
        let key = validate_key(key)?;
        let setting = self.repo.set_setting(key, value).await?;
        debug!(key, "Setting stored");
        Ok(setting)
    }

    pub async fn list(&self) -> Result<Vec<Setting>, AdminError> {
        Ok(self.repo.list_settings().await?)
    }
}

fn validate_key(key: &str) -> Result<&str, AdminError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(AdminError::invalid("setting key must not be empty"));
    }
    Ok(key)
}
