use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    FromRow, Row, SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use tracing::{error, info};

use crate::domain::{
    errors::StorageError,
    models::{Message, MessageId, Network},
    repositories::QueueStore,
};

const MAX_CONNECTIONS: u32 = 4;

/// Queue Store backed by a local SQLite file, one row per queued message.
#[derive(Clone)]
pub struct SqliteQueueStore {
    pool: SqlitePool,
}

impl SqliteQueueStore {
    /// Opens (creating if missing) the database at `database_url` and runs migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        info!(database_url, "opening queue store");
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    /// A private in-memory database; lives as long as the store.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl QueueStore for SqliteQueueStore {
    async fn enqueue(&self, message: &Message) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO queued_messages (id, recipient, body, network, created_at, attempts)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(message.id.to_string())
        .bind(&message.recipient)
        .bind(&message.body)
        .bind(message.network.as_str())
        .bind(message.created_at)
        .bind(i64::from(message.attempts))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Message>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, recipient, body, network, created_at, attempts
            FROM queued_messages
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        // One unreadable row must not hold back the rest of the queue.
        let messages = rows
            .iter()
            .filter_map(|row| {
                let decoded = QueuedMessageRecord::from_row(row)
                    .map_err(StorageError::from)
                    .and_then(Message::try_from);
                match decoded {
                    Ok(message) => Some(message),
                    Err(err) => {
                        let id = row.try_get::<String, _>("id").unwrap_or_default();
                        error!(
                            message_id = %id,
                            error = %err,
                            "skipping unreadable queue record"
                        );
                        None
                    }
                }
            })
            .collect();
        Ok(messages)
    }

    async fn remove(&self, id: &MessageId) -> Result<bool, StorageError> {
        let result = sqlx::query(r#"DELETE FROM queued_messages WHERE id = ?1"#)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn increment_attempts(&self, id: &MessageId) -> Result<Option<u32>, StorageError> {
        let attempts = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE queued_messages
            SET attempts = attempts + 1
            WHERE id = ?1
            RETURNING attempts
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        attempts
            .map(|attempts| {
                u32::try_from(attempts)
                    .map_err(|_| StorageError::Corrupt(format!("attempts out of range: {attempts}")))
            })
            .transpose()
    }
}

#[derive(FromRow)]
struct QueuedMessageRecord {
    id: String,
    recipient: String,
    body: String,
    network: String,
    created_at: DateTime<Utc>,
    attempts: i64,
}

impl TryFrom<QueuedMessageRecord> for Message {
    type Error = StorageError;

    fn try_from(value: QueuedMessageRecord) -> Result<Self, Self::Error> {
        let id = MessageId::parse(&value.id)
            .ok_or_else(|| StorageError::Corrupt(format!("bad message id {}", value.id)))?;
        let network = value
            .network
            .parse::<Network>()
            .map_err(|err| StorageError::Corrupt(err.to_string()))?;
        let attempts = u32::try_from(value.attempts)
            .map_err(|_| StorageError::Corrupt(format!("attempts out of range: {}", value.attempts)))?;
        Ok(Self {
            id,
            recipient: value.recipient,
            body: value.body,
            network,
            created_at: value.created_at,
            attempts,
        })
    }
}
