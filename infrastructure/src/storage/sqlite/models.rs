//! `cloud_llm_models` table.

use super::{SqliteStorage, db_error, now, timestamp, timestamp_column};
use async_trait::async_trait;
use grove_application::{CloudModelRepository, Page, PageRequest, StorageError};
use grove_domain::{CloudLlmModel, ModelId, NewCloudLlmModel};
use rusqlite::{Connection, OptionalExtension, Row, params};

const SQL_SELECT: &str = include_str!("../../../sql/model_select.sql");
const SQL_COUNT: &str = include_str!("../../../sql/model_count.sql");
const SQL_SELECT_PAGE: &str = include_str!("../../../sql/model_select_page.sql");
const SQL_INSERT: &str = include_str!("../../../sql/model_insert.sql");
const SQL_UPDATE: &str = include_str!("../../../sql/model_update.sql");
const SQL_SET_ENABLED: &str = include_str!("../../../sql/model_set_enabled.sql");
const SQL_DELETE: &str = include_str!("../../../sql/model_delete.sql");

fn model_from_row(row: &Row<'_>) -> rusqlite::Result<CloudLlmModel> {
    Ok(CloudLlmModel {
        id: ModelId::new(row.get(0)?),
        name: row.get(1)?,
        provider: row.get(2)?,
        endpoint: row.get(3)?,
        api_key: row.get(4)?,
        enabled: row.get(5)?,
        created_at: timestamp_column(row, 6)?,
        updated_at: timestamp_column(row, 7)?,
    })
}

fn select(conn: &Connection, id: ModelId) -> Result<CloudLlmModel, StorageError> {
    conn.query_row(SQL_SELECT, [id.get()], model_from_row)
        .optional()
        .map_err(db_error)?
        .ok_or_else(|| StorageError::not_found("model", id.get()))
}

fn require_changed(changed: usize, id: ModelId) -> Result<(), StorageError> {
    if changed == 0 {
        return Err(StorageError::not_found("model", id.get()));
    }
    Ok(())
}

#[async_trait]
impl CloudModelRepository for SqliteStorage {
    async fn find_model(&self, id: ModelId) -> Result<CloudLlmModel, StorageError> {
        let conn = self.conn()?;
        select(&conn, id)
    }

    async fn list_models(&self, page: PageRequest) -> Result<Page<CloudLlmModel>, StorageError> {
        let conn = self.conn()?;
        let total: i64 = conn
            .query_row(SQL_COUNT, [], |row| row.get(0))
            .map_err(db_error)?;
        let mut stmt = conn.prepare(SQL_SELECT_PAGE).map_err(db_error)?;
        let items = stmt
            .query_map(
                params![page.limit as i64, page.offset as i64],
                model_from_row,
            )
            .map_err(db_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_error)?;
        Ok(Page {
            total: total as u64,
            items,
        })
    }

    async fn insert_model(&self, model: &NewCloudLlmModel) -> Result<CloudLlmModel, StorageError> {
        let conn = self.conn()?;
        conn.execute(
            SQL_INSERT,
            params![
                model.name(),
                model.provider(),
                model.endpoint(),
                model.api_key(),
                model.enabled(),
                timestamp(&now()),
            ],
        )
        .map_err(db_error)?;
        select(&conn, ModelId::new(conn.last_insert_rowid()))
    }

    async fn update_model(
        &self,
        id: ModelId,
        model: &NewCloudLlmModel,
    ) -> Result<CloudLlmModel, StorageError> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                SQL_UPDATE,
                params![
                    id.get(),
                    model.name(),
                    model.provider(),
                    model.endpoint(),
                    model.api_key(),
                    model.enabled(),
                    timestamp(&now()),
                ],
            )
            .map_err(db_error)?;
        require_changed(changed, id)?;
        select(&conn, id)
    }

    async fn delete_model(&self, id: ModelId) -> Result<(), StorageError> {
        let changed = self
            .conn()?
            .execute(SQL_DELETE, [id.get()])
            .map_err(db_error)?;
        require_changed(changed, id)
    }

    async fn set_model_enabled(
        &self,
        id: ModelId,
        enabled: bool,
    ) -> Result<CloudLlmModel, StorageError> {
        let conn = self.conn()?;
        let changed = conn
            .execute(SQL_SET_ENABLED, params![id.get(), enabled, timestamp(&now())])
            .map_err(db_error)?;
        require_changed(changed, id)?;
        select(&conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_model(name: &str) -> NewCloudLlmModel {
        NewCloudLlmModel::new(name, "openai", "https://api.example.com/v1", "sk-secret").unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let storage = SqliteStorage::in_memory().unwrap();
        let created = storage.insert_model(&new_model("OpenAI")).await.unwrap();
        assert_eq!(created.id, ModelId::new(1));
        assert!(created.enabled);

        let found = storage.find_model(created.id).await.unwrap();
        assert_eq!(found.name, "OpenAI");
        assert_eq!(found.endpoint, "https://api.example.com/v1");
        assert_eq!(found.api_key, "sk-secret");
    }

    #[tokio::test]
    async fn test_find_missing() {
        let storage = SqliteStorage::in_memory().unwrap();
        let err = storage.find_model(ModelId::new(9)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_pages_by_id() {
        let storage = SqliteStorage::in_memory().unwrap();
        for i in 0..5 {
            storage.insert_model(&new_model(&format!("m{i}"))).await.unwrap();
        }
        let page = storage
            .list_models(PageRequest { offset: 2, limit: 2 })
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        let names: Vec<&str> = page.items.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["m2", "m3"]);
    }

    #[tokio::test]
    async fn test_list_past_the_end_is_empty() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.insert_model(&new_model("only")).await.unwrap();
        let page = storage
            .list_models(PageRequest::from_page(i64::MAX, 10, 10))
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_update_enable_delete() {
        let storage = SqliteStorage::in_memory().unwrap();
        let created = storage.insert_model(&new_model("old")).await.unwrap();

        let updated = storage
            .update_model(created.id, &new_model("new").disabled())
            .await
            .unwrap();
        assert_eq!(updated.name, "new");
        assert!(!updated.enabled);

        let enabled = storage.set_model_enabled(created.id, true).await.unwrap();
        assert!(enabled.enabled);

        storage.delete_model(created.id).await.unwrap();
        assert!(storage.find_model(created.id).await.unwrap_err().is_not_found());
        assert!(storage.delete_model(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_missing() {
        let storage = SqliteStorage::in_memory().unwrap();
        let err = storage
            .update_model(ModelId::new(3), &new_model("x"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(
            storage
                .set_model_enabled(ModelId::new(3), false)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }
}
