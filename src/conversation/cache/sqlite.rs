//! `SQLite`-backed chat cache.

use chrono::Utc;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use crate::conversation::cache::{CacheFuture, ChatCache, parse_chat_list};
use crate::conversation::core::chat::Chat;
use crate::conversation::core::config::StoreConfig;
use crate::conversation::core::errors::ConversationResult;

/// `SQLite` implementation of the chat cache.
///
/// Stores the whole chat list as one keyed row, which keeps the contract
/// identical to the in-memory implementation: the record either parses as a
/// list or counts as absent.
pub struct SqliteChatCache {
    conn: Connection,
    table: String,
    key: String,
}

impl SqliteChatCache {
    /// Initialize the cache over an existing connection and create the
    /// table if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the config is invalid or database operations fail.
    pub async fn new(conn: Connection, config: &StoreConfig) -> ConversationResult<Self> {
        config.validate()?;
        let table = config.cache_table.clone();
        let key = config.storage_key.clone();
        let table_name = table.clone();

        conn.call(move |conn| {
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {table_name} (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at INTEGER NOT NULL
                )"
            ))?;
            Ok(())
        })
        .await?;

        Ok(Self { conn, table, key })
    }

    /// Open the database at the configured path and initialize the cache.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub async fn open(config: &StoreConfig) -> ConversationResult<Self> {
        let conn = Connection::open(&config.sqlite_path).await?;
        Self::new(conn, config).await
    }
}

impl ChatCache for SqliteChatCache {
    fn load(&self) -> CacheFuture<'_, ConversationResult<Vec<Chat>>> {
        Box::pin(async move {
            let table = self.table.clone();
            let key = self.key.clone();
            let raw: Option<String> = self
                .conn
                .call(move |conn| {
                    let mut stmt =
                        conn.prepare(&format!("SELECT value FROM {table} WHERE key = ?1"))?;
                    let row = stmt.query_row([&key], |row| row.get(0)).optional()?;
                    Ok(row)
                })
                .await?;
            Ok(raw.map_or_else(Vec::new, |payload| parse_chat_list(&payload)))
        })
    }

    fn save(&self, chats: &[Chat]) -> CacheFuture<'_, ConversationResult<()>> {
        let serialized = serde_json::to_string(chats);
        Box::pin(async move {
            let payload = serialized?;
            let table = self.table.clone();
            let key = self.key.clone();
            let now_ms = Utc::now().timestamp_millis();
            self.conn
                .call(move |conn| {
                    conn.execute(
                        &format!(
                            "INSERT OR REPLACE INTO {table} (key, value, updated_at)
                             VALUES (?1, ?2, ?3)"
                        ),
                        rusqlite::params![key, payload, now_ms],
                    )?;
                    Ok(())
                })
                .await?;
            Ok(())
        })
    }

    fn clear(&self) -> CacheFuture<'_, ConversationResult<()>> {
        Box::pin(async move {
            let table = self.table.clone();
            let key = self.key.clone();
            self.conn
                .call(move |conn| {
                    conn.execute(&format!("DELETE FROM {table} WHERE key = ?1"), [&key])?;
                    Ok(())
                })
                .await?;
            Ok(())
        })
    }
}
