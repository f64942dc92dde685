//! In-process [`MessageStore`] with switchable failures, for handler tests.

use std::sync::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::entities::{Message, MessageStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Message>>,
    fail_reads: AtomicBool,
    fail_commits: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `list_all` fail until switched off.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every `insert` fail at commit time until switched off.
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    fn rows(&self) -> Result<MutexGuard<'_, Vec<Message>>, StoreError> {
        self.rows
            .lock()
            .map_err(|_| sqlx::Error::Protocol("store lock poisoned".into()).into())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("connection reset by peer".into()).into());
        }
        Ok(self.rows()?.clone())
    }

    async fn insert(&self, content: &str) -> Result<Message, StoreError> {
        let mut rows = self.rows()?;
        let staged = Message {
            id: rows.last().map_or(1, |m| m.id + 1),
            content: content.to_owned(),
        };
        if self.fail_commits.load(Ordering::SeqCst) {
            // The staged row is dropped, as a rolled-back transaction would be.
            return Err(sqlx::Error::Protocol("commit failed: disk I/O error".into()).into());
        }
        rows.push(staged.clone());
        Ok(staged)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn poisoned() -> MemoryStore {
        let store = MemoryStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.rows.lock().unwrap();
            panic!("poison the row lock");
        }));
        assert!(store.rows.is_poisoned());
        store
    }

    #[tokio::test]
    async fn poisoned_lock_fails_reads_and_writes() {
        let store = poisoned();
        assert!(matches!(store.list_all().await, Err(StoreError::Database(_))));
        assert!(matches!(store.insert("x").await, Err(StoreError::Database(_))));
    }

    #[tokio::test]
    async fn commit_failure_discards_staged_row() {
        let store = MemoryStore::new();
        store.insert("one").await.unwrap();
        store.fail_commits(true);
        assert!(store.insert("two").await.is_err());
        store.fail_commits(false);
        let rows = store.list_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(store.insert("three").await.unwrap().id, 2);
    }
}
