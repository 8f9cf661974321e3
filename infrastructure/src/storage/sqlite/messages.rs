//! `messages` table.

use super::{SqliteStorage, db_error, now, timestamp, timestamp_column};
use async_trait::async_trait;
use grove_application::{MessageRepository, StorageError};
use grove_domain::{ConversationId, Message, MessageId, Role};
use rusqlite::{Connection, Row, params};
use tracing::debug;

const SQL_INSERT: &str = include_str!("../../../sql/message_insert.sql");
const SQL_SELECT: &str = include_str!("../../../sql/message_select.sql");
const SQL_RECENT: &str = include_str!("../../../sql/message_recent.sql");
const SQL_LIST: &str = include_str!("../../../sql/message_list.sql");
const SQL_TOUCH_CONVERSATION: &str = include_str!("../../../sql/conversation_touch.sql");

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    let role: String = row.get(2)?;
    Ok(Message {
        id: MessageId::new(row.get(0)?),
        conversation_id: ConversationId::new(row.get(1)?),
        role: Role::from_stored(&role),
        content: row.get(3)?,
        created_at: timestamp_column(row, 4)?,
    })
}

fn insert(
    conn: &Connection,
    conversation_id: ConversationId,
    role: &Role,
    content: &str,
    at: &str,
) -> Result<Message, StorageError> {
    conn.execute(
        SQL_INSERT,
        params![conversation_id.get(), role.as_str(), content, at],
    )
    .map_err(db_error)?;
    conn.query_row(SQL_SELECT, [conn.last_insert_rowid()], message_from_row)
        .map_err(db_error)
}

#[async_trait]
impl MessageRepository for SqliteStorage {
    async fn recent_messages(
        &self,
        conversation_id: ConversationId,
        limit: usize,
    ) -> Result<Vec<Message>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(SQL_RECENT).map_err(db_error)?;
        stmt.query_map(
            params![conversation_id.get(), limit as i64],
            message_from_row,
        )
        .map_err(db_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(db_error)
    }

    async fn list_messages(
        &self,
        conversation_id: ConversationId,
        before: Option<MessageId>,
        limit: usize,
    ) -> Result<Vec<Message>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(SQL_LIST).map_err(db_error)?;
        stmt.query_map(
            params![conversation_id.get(), before.map(MessageId::get), limit as i64],
            message_from_row,
        )
        .map_err(db_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(db_error)
    }

    async fn append_turn(
        &self,
        conversation_id: ConversationId,
        question: &str,
        answer: &str,
    ) -> Result<(Message, Message), StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(db_error)?;
        let at = timestamp(&now());
        let user = insert(&tx, conversation_id, &Role::User, question, &at)?;
        let assistant = insert(&tx, conversation_id, &Role::Assistant, answer, &at)?;
        tx.execute(SQL_TOUCH_CONVERSATION, params![conversation_id.get(), at])
            .map_err(db_error)?;
        tx.commit().map_err(db_error)?;
        debug!(
            conversation_id = conversation_id.get(),
            user_id = user.id.get(),
            assistant_id = assistant.id.get(),
            "Appended turn"
        );
        Ok((user, assistant))
    }
}
