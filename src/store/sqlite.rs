use rusqlite::{params, OptionalExtension};

use crate::db::DbPool;
use crate::error::StoreError;

use super::{check_quota, SlotStore};

/// SQLite-backed slot store. One row per key in the `slots` table.
pub struct SqliteStore {
    pub pool: DbPool,
    quota_bytes: usize,
}

impl SqliteStore {
    pub fn new(pool: DbPool, quota_bytes: usize) -> Self {
        Self { pool, quota_bytes }
    }
}

impl SlotStore for SqliteStore {
    fn slot_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.pool.get()?;
        let value = conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn slot_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        check_quota(key, value, self.quota_bytes)?;
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }

    fn slot_delete(&self, key: &str) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM slots WHERE key = ?1", params![key])?;
        Ok(())
    }
}
