mod sqlite;

pub use sqlite::SqliteHistoryStore;

use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use crate::config::RelayConfig;
use crate::error::StorageError;
use crate::models::chat::ChatRecord;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(
        &self,
        user_id: i64,
        message: &str,
        response: &str
    ) -> Result<(), StorageError>;

    /// All records of `user_id`, oldest first.
    async fn fetch_ordered(&self, user_id: i64) -> Result<Vec<ChatRecord>, StorageError>;

    async fn clear(&self, user_id: i64) -> Result<(), StorageError>;
}

pub async fn initialize_history_store(
    config: &RelayConfig
) -> Result<Arc<dyn HistoryStore>, StorageError> {
    info!("Chat history will be stored in: {}", config.database_path.display());
    let store = SqliteHistoryStore::open(&config.database_path).await?;
    Ok(Arc::new(store))
}

/// The trailing `limit` records, still oldest first.
pub fn history_window(records: &[ChatRecord], limit: usize) -> &[ChatRecord] {
    let start = records.len().saturating_sub(limit);
    &records[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: i64) -> ChatRecord {
        ChatRecord {
            id,
            user_id: 1,
            message: format!("m{}", id),
            response: format!("r{}", id),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn window_keeps_most_recent_records_in_order() {
        let records: Vec<ChatRecord> = (1..=15).map(record).collect();
        let window = history_window(&records, 10);
        assert_eq!(window.len(), 10);
        assert_eq!(window.first().unwrap().id, 6);
        assert_eq!(window.last().unwrap().id, 15);
    }

    #[test]
    fn window_shorter_than_limit_is_untouched() {
        let records: Vec<ChatRecord> = (1..=3).map(record).collect();
        assert_eq!(history_window(&records, 10).len(), 3);
        assert!(history_window(&[], 10).is_empty());
    }
}
