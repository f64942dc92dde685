use async_trait::async_trait;
use tracing::{debug, warn};

use crate::entities::{AnyStore, Message, StoreError};

/// Repository interface over the `message` table.
#[async_trait]
pub trait MessageStore: Send + Sync + 'static {
    /// Every stored message, in ascending `id` order.
    async fn list_all(&self) -> Result<Vec<Message>, StoreError>;

    /// Persist a new message in its own transaction and return it with its
    /// generated id. On failure nothing is left behind in the store.
    async fn insert(&self, content: &str) -> Result<Message, StoreError>;
}

#[async_trait]
impl MessageStore for AnyStore {
    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, content FROM message ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, content)| Message { id, content })
            .collect())
    }

    async fn insert(&self, content: &str) -> Result<Message, StoreError> {
        let mut tx = self.pool.begin().await?;

        let inserted: Result<(i64,), sqlx::Error> =
            sqlx::query_as("INSERT INTO message (content) VALUES ($1) RETURNING id")
                .bind(content)
                .fetch_one(&mut *tx)
                .await;

        let (id,) = match inserted {
            Ok(row) => row,
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "rollback after failed insert failed");
                }
                return Err(e.into());
            }
        };

        tx.commit().await?;
        debug!(id, "message row committed");
        Ok(Message {
            id,
            content: content.to_owned(),
        })
    }
}
