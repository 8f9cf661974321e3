//! Cloud model administration.
//!
//! Registers the provider endpoints and API keys that chat requests run
//! against.

use crate::ports::storage::{CloudModelRepository, Page, PageRequest};
use crate::use_cases::shared::{AdminError, require_positive};
use grove_domain::{CloudLlmModel, ModelId, NewCloudLlmModel};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Default page size for model listings.
pub const DEFAULT_MODEL_PAGE_SIZE: u64 = 10;

/// Unvalidated model fields as entered by a user.
#[derive(Clone, Deserialize)]
pub struct ModelDraft {
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl ModelDraft {
    fn validate(self) -> Result<NewCloudLlmModel, AdminError> {
        let model = NewCloudLlmModel::new(self.name, self.provider, self.endpoint, self.api_key)?;
        Ok(if self.enabled { model } else { model.disabled() })
    }
}

/// Use case for managing the cloud model registry.
#[derive(Clone)]
pub struct ManageModelsUseCase {
    repo: Arc<dyn CloudModelRepository>,
}

impl ManageModelsUseCase {
    pub fn new(repo: Arc<dyn CloudModelRepository>) -> Self {
        Self { repo }
    }

    /// Register a model. Name, provider and API key are required.
    pub async fn create(&self, draft: ModelDraft) -> Result<CloudLlmModel, AdminError> {
        let model = self.repo.insert_model(&draft.validate()?).await?;
        info!(model_id = model.id.get(), name = %model.name, "Registered model");
        Ok(model)
    }

    /// Page through models by id. `page < 1` means the first page and
    /// `size < 1` the default size.
    pub async fn list(&self, page: i64, size: i64) -> Result<Page<CloudLlmModel>, AdminError> {
        let window = PageRequest::from_page(page, size, DEFAULT_MODEL_PAGE_SIZE);
        Ok(self.repo.list_models(window).await?)
    }

    pub async fn get(&self, id: i64) -> Result<CloudLlmModel, AdminError> {
        require_positive("model id", id)?;
        Ok(self.repo.find_model(ModelId::new(id)).await?)
    }

    /// Replace every mutable field of an existing model.
    pub async fn update(&self, id: i64, draft: ModelDraft) -> Result<CloudLlmModel, AdminError> {
        require_positive("model id", id)?;
        let model = self
            .repo
            .update_model(ModelId::new(id), &draft.validate()?)
            .await?;
        info!(model_id = id, "Updated model");
        Ok(model)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AdminError> {
        require_positive("model id", id)?;
        self.repo.delete_model(ModelId::new(id)).await?;
        info!(model_id = id, "Deleted model");
        Ok(())
    }

    pub async fn set_enabled(&self, id: i64, enabled: bool) -> Result<CloudLlmModel, AdminError> {
        require_positive("model id", id)?;
        let model = self.repo.set_model_enabled(ModelId::new(id), enabled).await?;
        info!(model_id = id, enabled, "Changed model availability");
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::storage::StorageError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockModels {
        rows: Mutex<Vec<CloudLlmModel>>,
        last_page: Mutex<Option<PageRequest>>,
    }

    impl MockModels {
        fn row(id: ModelId, model: &NewCloudLlmModel) -> CloudLlmModel {
            CloudLlmModel {
                id,
                name: model.name().to_string(),
                provider: model.provider().to_string(),
                endpoint: model.endpoint().to_string(),
                api_key: model.api_key().to_string(),
                enabled: model.enabled(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl CloudModelRepository for MockModels {
        async fn find_model(&self, id: ModelId) -> Result<CloudLlmModel, StorageError> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.id == id)
                .cloned()
                .ok_or_else(|| StorageError::not_found("model", id.get()))
        }

        async fn list_models(&self, page: PageRequest) -> Result<Page<CloudLlmModel>, StorageError> {
            *self.last_page.lock().unwrap() = Some(page);
            let rows = self.rows.lock().unwrap();
            Ok(Page {
                total: rows.len() as u64,
                items: rows
                    .iter()
                    .skip(page.offset as usize)
                    .take(page.limit as usize)
                    .cloned()
                    .collect(),
            })
        }

        async fn insert_model(&self, model: &NewCloudLlmModel) -> Result<CloudLlmModel, StorageError> {
            let mut rows = self.rows.lock().unwrap();
            let row = Self::row(ModelId::new(rows.len() as i64 + 1), model);
            rows.push(row.clone());
            Ok(row)
        }

        async fn update_model(
            &self,
            id: ModelId,
            model: &NewCloudLlmModel,
        ) -> Result<CloudLlmModel, StorageError> {
            let mut rows = self.rows.lock().unwrap();
            let slot = rows
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or_else(|| StorageError::not_found("model", id.get()))?;
            *slot = Self::row(id, model);
            Ok(slot.clone())
        }

        async fn delete_model(&self, id: ModelId) -> Result<(), StorageError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|m| m.id != id);
            if rows.len() == before {
                return Err(StorageError::not_found("model", id.get()));
            }
            Ok(())
        }

        async fn set_model_enabled(
            &self,
            id: ModelId,
            enabled: bool,
        ) -> Result<CloudLlmModel, StorageError> {
            let mut rows = self.rows.lock().unwrap();
            let slot = rows
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or_else(|| StorageError::not_found("model", id.get()))?;
            slot.enabled = enabled;
            Ok(slot.clone())
        }
    }

    fn draft(name: &str) -> ModelDraft {
        ModelDraft {
            name: name.to_string(),
            provider: "openai".to_string(),
            endpoint: String::new(),
            api_key: "sk-1".to_string(),
            enabled: true,
        }
    }

    fn use_case() -> (ManageModelsUseCase, Arc<MockModels>) {
        let repo = Arc::new(MockModels::default());
        (ManageModelsUseCase::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_create_requires_name_provider_and_key() {
        let (uc, repo) = use_case();
        for bad in [
            ModelDraft { name: " ".to_string(), ..draft("x") },
            ModelDraft { provider: String::new(), ..draft("x") },
            ModelDraft { api_key: String::new(), ..draft("x") },
        ] {
            assert!(matches!(
                uc.create(bad).await,
                Err(AdminError::InvalidArgument(_))
            ));
        }
        assert!(repo.rows.lock().unwrap().is_empty());

        let created = uc.create(draft("OpenAI")).await.unwrap();
        assert_eq!(created.id, ModelId::new(1));
        assert!(created.enabled);
    }

    #[tokio::test]
    async fn test_list_applies_page_defaults() {
        let (uc, repo) = use_case();
        for i in 0..12 {
            uc.create(draft(&format!("m{i}"))).await.unwrap();
        }

        let page = uc.list(0, 0).await.unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(page.items.len(), 10);
        assert_eq!(
            *repo.last_page.lock().unwrap(),
            Some(PageRequest { offset: 0, limit: 10 })
        );

        let page = uc.list(2, 10).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].name, "m10");
    }

    #[tokio::test]
    async fn test_ids_must_be_positive() {
        let (uc, _) = use_case();
        assert!(matches!(uc.get(0).await, Err(AdminError::InvalidArgument(_))));
        assert!(matches!(uc.delete(-1).await, Err(AdminError::InvalidArgument(_))));
        assert!(matches!(
            uc.update(0, draft("x")).await,
            Err(AdminError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_update_enable_and_delete() {
        let (uc, _) = use_case();
        let created = uc.create(draft("old")).await.unwrap();
        let id = created.id.get();

        let updated = uc.update(id, draft("new")).await.unwrap();
        assert_eq!(updated.name, "new");

        let disabled = uc.set_enabled(id, false).await.unwrap();
        assert!(!disabled.enabled);
        assert!(!uc.get(id).await.unwrap().enabled);

        uc.delete(id).await.unwrap();
        assert!(matches!(
            uc.get(id).await,
            Err(AdminError::NotFound { entity: "model", .. })
        ));
    }

    #[tokio::test]
    async fn test_create_disabled() {
        let (uc, _) = use_case();
        let created = uc
            .create(ModelDraft { enabled: false, ..draft("off") })
            .await
            .unwrap();
        assert!(!created.enabled);
    }
}
