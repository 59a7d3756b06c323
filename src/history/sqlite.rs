use async_trait::async_trait;
use chrono::{ DateTime, Utc };
use log::{ debug, info, warn };
use sqlx::sqlite::{ SqliteConnectOptions, SqlitePool, SqlitePoolOptions };
use std::path::Path;
use std::time::Duration;
use crate::error::StorageError;
use crate::history::HistoryStore;
use crate::models::chat::ChatRecord;

const CREATE_TABLE: &str =
    r#"CREATE TABLE IF NOT EXISTS chat_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER,
        message TEXT,
        response TEXT,
        timestamp INTEGER
    )"#;

type RecordRow = (i64, i64, String, String, i64);

/// `chat_history` table in a local SQLite file.
///
/// The pool holds a single connection, so statements from concurrent
/// handlers run one after another in arrival order.
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    pub async fn open(path: &Path) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options).await
            .map_err(StorageError::Open)?;

        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        info!("History table ready in {}", path.display());

        Ok(Self { pool })
    }
}

fn into_record((id, user_id, message, response, millis): RecordRow) -> ChatRecord {
    let timestamp = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_else(|| {
        warn!("Record {} has an out-of-range timestamp {}", id, millis);
        DateTime::<Utc>::default()
    });
    ChatRecord { id, user_id, message, response, timestamp }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn append(
        &self,
        user_id: i64,
        message: &str,
        response: &str
    ) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO chat_history (user_id, message, response, timestamp) VALUES (?, ?, ?, ?)"
        )
            .bind(user_id)
            .bind(message)
            .bind(response)
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool).await?;
        debug!("Stored exchange for user {}", user_id);
        Ok(())
    }

    async fn fetch_ordered(&self, user_id: i64) -> Result<Vec<ChatRecord>, StorageError> {
        let rows: Vec<RecordRow> = sqlx
            ::query_as(
                "SELECT id, user_id, message, response, timestamp FROM chat_history \
                 WHERE user_id = ? ORDER BY timestamp ASC, id ASC"
            )
            .bind(user_id)
            .fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(into_record).collect())
    }

    async fn clear(&self, user_id: i64) -> Result<(), StorageError> {
        let result = sqlx
            ::query("DELETE FROM chat_history WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool).await?;
        info!("Cleared {} history records for user {}", result.rows_affected(), user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> (tempfile::TempDir, SqliteHistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteHistoryStore::open(&dir.path().join("history.db")).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn fetch_on_unknown_user_is_empty() {
        let (_dir, store) = temp_store().await;
        assert!(store.fetch_ordered(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn appended_records_come_back_in_timestamp_order() {
        let (_dir, store) = temp_store().await;
        for i in 0..25 {
            store.append(7, &format!("q{}", i), &format!("a{}", i)).await.unwrap();
        }

        let records = store.fetch_ordered(7).await.unwrap();
        assert_eq!(records.len(), 25);
        assert!(records.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(records[0].message, "q0");
        assert_eq!(records[24].response, "a24");
        assert!(records.iter().all(|r| r.user_id == 7));
    }

    #[tokio::test]
    async fn clear_removes_only_that_users_history() {
        let (_dir, store) = temp_store().await;
        store.append(1, "hi", "hello").await.unwrap();
        store.append(1, "bye", "goodbye").await.unwrap();
        store.append(2, "other", "user").await.unwrap();

        store.clear(1).await.unwrap();

        assert!(store.fetch_ordered(1).await.unwrap().is_empty());
        assert_eq!(store.fetch_ordered(2).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let (_dir, store) = temp_store().await;
        store.clear(9).await.unwrap();
        store.clear(9).await.unwrap();
        assert!(store.fetch_ordered(9).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reopening_keeps_existing_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.db");
        {
            let store = SqliteHistoryStore::open(&path).await.unwrap();
            store.append(3, "persist", "me").await.unwrap();
            store.pool.close().await;
        }
        let store = SqliteHistoryStore::open(&path).await.unwrap();
        let records = store.fetch_ordered(3).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "persist");
    }
}
