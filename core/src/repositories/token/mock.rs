//! In-memory implementation of TokenStore for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::token::RefreshRecord;
use crate::errors::DomainError;

use super::r#trait::{ReplaceOutcome, TokenStore};

/// In-memory token store backed by a mutex-guarded map keyed by token hash.
///
/// The single lock makes `replace_if_present` one critical section,
/// giving the same atomicity the SQL implementation gets from a
/// transaction.
#[derive(Clone)]
pub struct MockTokenStore {
    records: Arc<Mutex<HashMap<String, RefreshRecord>>>,
}

impl MockTokenStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MockTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn insert_refresh(&self, record: RefreshRecord) -> Result<RefreshRecord, DomainError> {
        let mut records = self.records.lock().await;

        // Same fault kind the SQL store surfaces for a unique-key
        // violation on token_hash.
        if records.contains_key(&record.token_hash) {
            return Err(DomainError::Storage {
                message: "insert refresh record: duplicate token hash".to_string(),
            });
        }

        records.insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<RefreshRecord>, DomainError> {
        let records = self.records.lock().await;
        Ok(records
            .values()
            .filter(|r| r.user_id == user_id && !r.is_expired())
            .cloned()
            .collect())
    }

    async fn replace_if_present(
        &self,
        old_hash: &str,
        new_record: RefreshRecord,
    ) -> Result<ReplaceOutcome, DomainError> {
        // Delete and insert under one lock; concurrent callers
        // presenting the same old_hash serialize here and exactly one
        // observes the record.
        let mut records = self.records.lock().await;

        if records.remove(old_hash).is_none() {
            return Ok(ReplaceOutcome::NotFound);
        }

        records.insert(new_record.token_hash.clone(), new_record);
        Ok(ReplaceOutcome::Replaced)
    }

    async fn revoke_all(&self, user_id: i64) -> Result<usize, DomainError> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, r| r.user_id != user_id);
        Ok(before - records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(user_id: i64, hash: &str) -> RefreshRecord {
        RefreshRecord::new(user_id, hash.to_string(), Utc::now() + Duration::hours(24))
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let store = MockTokenStore::new();

        store.insert_refresh(record(1, "a")).await.unwrap();
        store.insert_refresh(record(1, "b")).await.unwrap();
        store.insert_refresh(record(2, "c")).await.unwrap();

        let sessions = store.list_by_user(1).await.unwrap();
        assert_eq!(sessions.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_hash_insert_is_storage_fault() {
        let store = MockTokenStore::new();
        store.insert_refresh(record(1, "a")).await.unwrap();

        let err = store.insert_refresh(record(1, "a")).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_list_skips_expired_records() {
        let store = MockTokenStore::new();

        let mut expired = record(1, "old");
        expired.expires_at = Utc::now() - Duration::hours(1);
        store.insert_refresh(expired).await.unwrap();
        store.insert_refresh(record(1, "live")).await.unwrap();

        let sessions = store.list_by_user(1).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].token_hash, "live");
    }

    #[tokio::test]
    async fn test_replace_if_present_swaps_record() {
        let store = MockTokenStore::new();
        store.insert_refresh(record(1, "old")).await.unwrap();

        let outcome = store.replace_if_present("old", record(1, "new")).await.unwrap();
        assert_eq!(outcome, ReplaceOutcome::Replaced);

        let sessions = store.list_by_user(1).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].token_hash, "new");
    }

    #[tokio::test]
    async fn test_replace_if_present_rejects_absent_hash() {
        let store = MockTokenStore::new();

        let outcome = store
            .replace_if_present("never-issued", record(1, "new"))
            .await
            .unwrap();
        assert_eq!(outcome, ReplaceOutcome::NotFound);

        // The rejected swap must not insert anything
        assert!(store.list_by_user(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_consumes_at_most_once() {
        let store = MockTokenStore::new();
        store.insert_refresh(record(1, "r0")).await.unwrap();

        let first = store.replace_if_present("r0", record(1, "r1")).await.unwrap();
        let second = store.replace_if_present("r0", record(1, "r2")).await.unwrap();

        assert_eq!(first, ReplaceOutcome::Replaced);
        assert_eq!(second, ReplaceOutcome::NotFound);
        assert_eq!(store.list_by_user(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_revoke_all_deletes_only_that_user() {
        let store = MockTokenStore::new();
        store.insert_refresh(record(1, "a")).await.unwrap();
        store.insert_refresh(record(1, "b")).await.unwrap();
        store.insert_refresh(record(2, "c")).await.unwrap();

        let revoked = store.revoke_all(1).await.unwrap();
        assert_eq!(revoked, 2);
        assert!(store.list_by_user(1).await.unwrap().is_empty());
        assert_eq!(store.list_by_user(2).await.unwrap().len(), 1);
    }
}
