//! `settings` table.

use super::{SqliteStorage, db_error, now, timestamp, timestamp_column};
use async_trait::async_trait;
use grove_application::{SettingRepository, StorageError};
use grove_domain::Setting;
use rusqlite::{OptionalExtension, Row, params};

const SQL_SELECT: &str = include_str!("../../../sql/setting_select.sql");
const SQL_SELECT_ALL: &str = include_str!("../../../sql/setting_select_all.sql");
const SQL_UPSERT: &str = include_str!("../../../sql/setting_upsert.sql");

fn setting_from_row(row: &Row<'_>) -> rusqlite::Result<Setting> {
    Ok(Setting {
        key: row.get(0)?,
        value: row.get(1)?,
        updated_at: timestamp_column(row, 2)?,
    })
}

#[async_trait]
impl SettingRepository for SqliteStorage {
    async fn get_setting(&self, key: &str) -> Result<Option<Setting>, StorageError> {
        self.conn()?
            .query_row(SQL_SELECT, [key], setting_from_row)
            .optional()
            .map_err(db_error)
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<Setting, StorageError> {
        let conn = self.conn()?;
        conn.execute(SQL_UPSERT, params![key, value, timestamp(&now())])
            .map_err(db_error)?;
        conn.query_row(SQL_SELECT, [key], setting_from_row)
            .map_err(db_error)
    }

    async fn list_settings(&self) -> Result<Vec<Setting>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(SQL_SELECT_ALL).map_err(db_error)?;
        stmt.query_map([], setting_from_row)
            .map_err(db_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_error)
    }
}
