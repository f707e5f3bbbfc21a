// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed conversation log (long-term store).
//!
//! One row per message in `conversation_log`. Every row carries the
//! collection name, so several collections can share a database file and
//! never see each other's entries. All statements run on the single
//! tokio-rusqlite background thread.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use banter_core::{
    AdapterType, BanterError, HealthStatus, LongTermEntry, LongTermStore, PluginAdapter, Role,
};
use tokio_rusqlite::Connection;
use tracing::{debug, info, warn};

/// In-memory database path.
pub const IN_MEMORY_PATH: &str = ":memory:";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS conversation_log (
    id TEXT PRIMARY KEY NOT NULL,
    collection TEXT NOT NULL,
    session_id TEXT NOT NULL,
    role TEXT NOT NULL,
    message TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_conversation_log_session
    ON conversation_log(collection, session_id, created_at);
";

/// Convert a tokio-rusqlite error into BanterError::Storage.
fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> BanterError {
    BanterError::Storage {
        source: Box::new(e),
    }
}

/// Raw row as read from SQLite, before the role is parsed.
struct LogRow {
    id: String,
    session_id: String,
    role: String,
    message: String,
    created_at: String,
}

impl LogRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            session_id: row.get(1)?,
            role: row.get(2)?,
            message: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn into_entry(self) -> Option<LongTermEntry> {
        let role = match Role::from_str(&self.role) {
            Ok(role) => role,
            Err(_) => {
                warn!(id = %self.id, role = %self.role, "skipping log row with unknown role");
                return None;
            }
        };
        Some(LongTermEntry {
            id: self.id,
            session_id: self.session_id,
            role,
            message: self.message,
            timestamp: self.created_at,
        })
    }
}

/// Append-only conversation log stored in SQLite.
pub struct SqliteLogStore {
    conn: Connection,
    collection: String,
}

impl SqliteLogStore {
    /// Opens (creating if needed) the database at `path` and ensures the schema.
    ///
    /// Missing parent directories are created. `:memory:` opens a private
    /// in-memory database.
    pub async fn open(path: &str, collection: &str) -> Result<Self, BanterError> {
        let conn = if path == IN_MEMORY_PATH {
            Connection::open_in_memory()
                .await
                .map_err(BanterError::storage)?
        } else {
            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(BanterError::storage)?;
            }
            let conn = Connection::open(path)
                .await
                .map_err(BanterError::storage)?;
            conn.call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
            conn
        };

        conn.call(|conn| conn.execute_batch(SCHEMA))
            .await
            .map_err(map_tr_err)?;

        info!(path, collection, "conversation log opened");

        Ok(Self {
            conn,
            collection: collection.to_string(),
        })
    }

    /// Name of the collection this handle reads and writes.
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl PluginAdapter for SqliteLogStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::LongTermStore
    }

    async fn health_check(&self) -> Result<HealthStatus, BanterError> {
        let probe = self
            .conn
            .call(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .await;
        Ok(match probe {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        })
    }

    async fn shutdown(&self) -> Result<(), BanterError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        // Closing through a clone closes the shared background connection.
        self.conn
            .clone()
            .close()
            .await
            .map_err(BanterError::storage)?;
        debug!(collection = %self.collection, "conversation log closed");
        Ok(())
    }
}

#[async_trait]
impl LongTermStore for SqliteLogStore {
    async fn add(&self, entry: &LongTermEntry) -> Result<(), BanterError> {
        let collection = self.collection.clone();
        let id = entry.id.clone();
        let session_id = entry.session_id.clone();
        let role = entry.role.to_string();
        let message = entry.message.clone();
        let created_at = entry.timestamp.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO conversation_log (id, collection, session_id, role, message, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    rusqlite::params![id, collection, session_id, role, message, created_at],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn query(
        &self,
        session_id: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<LongTermEntry>, BanterError> {
        let collection = self.collection.clone();
        let session_id = session_id.map(str::to_string);
        // SQLite treats a negative LIMIT as "no limit".
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));

        let rows = self
            .conn
            .call(move |conn| {
                // Newest `limit` rows, handed back oldest first.
                let mut stmt = conn.prepare(
                    "SELECT id, session_id, role, message, created_at FROM ( \
                         SELECT id, session_id, role, message, created_at, rowid AS seq \
                         FROM conversation_log \
                         WHERE collection = ?1 AND (?2 IS NULL OR session_id = ?2) \
                         ORDER BY created_at DESC, rowid DESC LIMIT ?3 \
                     ) ORDER BY created_at ASC, seq ASC",
                )?;
                let rows = stmt
                    .query_map(
                        rusqlite::params![collection, session_id, limit],
                        LogRow::from_row,
                    )?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await
            .map_err(map_tr_err)?;

        Ok(rows.into_iter().filter_map(LogRow::into_entry).collect())
    }

    async fn ids(&self, session_id: Option<&str>) -> Result<Vec<String>, BanterError> {
        let collection = self.collection.clone();
        let session_id = session_id.map(str::to_string);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id FROM conversation_log \
                     WHERE collection = ?1 AND (?2 IS NULL OR session_id = ?2)",
                )?;
                let ids = stmt
                    .query_map(rusqlite::params![collection, session_id], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(ids)
            })
            .await
            .map_err(map_tr_err)
    }

    async fn delete(&self, ids: &[String]) -> Result<usize, BanterError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let collection = self.collection.clone();
        let ids = ids.to_vec();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let mut removed = 0;
                {
                    let mut stmt = tx.prepare(
                        "DELETE FROM conversation_log WHERE collection = ?1 AND id = ?2",
                    )?;
                    for id in &ids {
                        removed += stmt.execute(rusqlite::params![collection, id])?;
                    }
                }
                tx.commit()?;
                Ok(removed)
            })
            .await
            .map_err(map_tr_err)
    }
}
