//! `conversations` table.

use super::{SqliteStorage, db_error, now, timestamp, timestamp_column};
use async_trait::async_trait;
use grove_application::{ConversationRepository, Page, PageRequest, StorageError};
use grove_domain::{Conversation, ConversationId};
use rusqlite::{Connection, OptionalExtension, Row, params};

const SQL_SELECT: &str = include_str!("../../../sql/conversation_select.sql");
const SQL_INSERT: &str = include_str!("../../../sql/conversation_insert.sql");
const SQL_COUNT: &str = include_str!("../../../sql/conversation_count.sql");
const SQL_SELECT_PAGE: &str = include_str!("../../../sql/conversation_select_page.sql");
const SQL_RENAME: &str = include_str!("../../../sql/conversation_rename.sql");

fn conversation_from_row(row: &Row<'_>) -> rusqlite::Result<Conversation> {
    Ok(Conversation {
        id: ConversationId::new(row.get(0)?),
        title: row.get(1)?,
        created_at: timestamp_column(row, 2)?,
        updated_at: timestamp_column(row, 3)?,
    })
}

fn select(conn: &Connection, id: ConversationId) -> Result<Conversation, StorageError> {
    conn.query_row(SQL_SELECT, [id.get()], conversation_from_row)
        .optional()
        .map_err(db_error)?
        .ok_or_else(|| StorageError::not_found("conversation", id.get()))
}

/// `LIKE` pattern matching `search` anywhere, with wildcards escaped.
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ConversationRepository for SqliteStorage {
    async fn find_conversation(&self, id: ConversationId) -> Result<Conversation, StorageError> {
        let conn = self.conn()?;
        select(&conn, id)
    }

    async fn create_conversation(&self) -> Result<Conversation, StorageError> {
        let conn = self.conn()?;
        conn.execute(SQL_INSERT, [timestamp(&now())])
            .map_err(db_error)?;
        select(&conn, ConversationId::new(conn.last_insert_rowid()))
    }

    async fn list_conversations(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Conversation>, StorageError> {
        let pattern = search.map(like_pattern);
        let conn = self.conn()?;
        let total: i64 = conn
            .query_row(SQL_COUNT, [&pattern], |row| row.get(0))
            .map_err(db_error)?;
        let mut stmt = conn.prepare(SQL_SELECT_PAGE).map_err(db_error)?;
        let items = stmt
            .query_map(
                params![pattern, page.limit as i64, page.offset as i64],
                conversation_from_row,
            )
            .map_err(db_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_error)?;
        Ok(Page {
            total: total as u64,
            items,
        })
    }

    async fn rename_conversation(
        &self,
        id: ConversationId,
        title: Option<&str>,
    ) -> Result<Conversation, StorageError> {
        let conn = self.conn()?;
        let changed = conn
            .execute(SQL_RENAME, params![id.get(), title, timestamp(&now())])
            .map_err(db_error)?;
        if changed == 0 {
            return Err(StorageError::not_found("conversation", id.get()));
        }
        select(&conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(titles: &[Option<&str>]) -> SqliteStorage {
        let storage = SqliteStorage::in_memory().unwrap();
        for title in titles {
            let c = storage.create_conversation().await.unwrap();
            if title.is_some() {
                storage.rename_conversation(c.id, *title).await.unwrap();
            }
        }
        storage
    }

    fn all() -> PageRequest {
        PageRequest {
            offset: 0,
            limit: 50,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let storage = SqliteStorage::in_memory().unwrap();
        let created = storage.create_conversation().await.unwrap();
        assert_eq!(created.id, ConversationId::new(1));
        assert_eq!(created.title, None);

        let found = storage.find_conversation(created.id).await.unwrap();
        assert_eq!(found.id, created.id);
        assert!(
            storage
                .find_conversation(ConversationId::new(2))
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let storage = seeded(&[None, None, None]).await;
        let page = storage.list_conversations(all(), None).await.unwrap();
        assert_eq!(page.total, 3);
        let ids: Vec<i64> = page.items.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let page = storage
            .list_conversations(PageRequest { offset: 1, limit: 1 }, None)
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items[0].id, ConversationId::new(2));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let storage = seeded(&[Some("Rust lifetimes"), Some("Dinner plans"), None]).await;
        let page = storage
            .list_conversations(all(), Some("rUST"))
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title.as_deref(), Some("Rust lifetimes"));
    }

    #[tokio::test]
    async fn test_search_escapes_wildcards() {
        let storage = seeded(&[Some("100% done"), Some("1000 items")]).await;
        let page = storage.list_conversations(all(), Some("0%")).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title.as_deref(), Some("100% done"));
    }

    #[tokio::test]
    async fn test_rename_and_clear() {
        let storage = seeded(&[None]).await;
        let id = ConversationId::new(1);
        let renamed = storage.rename_conversation(id, Some("Trip")).await.unwrap();
        assert_eq!(renamed.title.as_deref(), Some("Trip"));

        let cleared = storage.rename_conversation(id, None).await.unwrap();
        assert_eq!(cleared.title, None);

        assert!(
            storage
                .rename_conversation(ConversationId::new(5), Some("x"))
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_like_pattern() {
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("plain"), "%plain%");
    }
}
