//! Token store trait defining the interface for refresh credential persistence.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshRecord;
use crate::errors::DomainError;

/// Outcome of the atomic replace primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The old record was present and has been swapped for the new one
    Replaced,
    /// The old record was absent (already consumed or never issued);
    /// no insert was performed
    NotFound,
}

/// Store for outstanding refresh credential records.
///
/// One record per outstanding refresh credential, keyed by the SHA-256
/// hash of the credential value. Multiple records may coexist per user
/// (concurrent sessions/devices).
///
/// # Security Considerations
/// - Credential values are hashed before storage; the store never sees
///   raw token material.
/// - `replace_if_present` is the race-safety primitive: it must be
///   atomic so a given credential value is consumable at most once.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Append a new refresh record.
    ///
    /// No uniqueness constraint on `user_id`: a user may hold several
    /// outstanding sessions.
    ///
    /// # Returns
    /// * `Ok(RefreshRecord)` - The persisted record
    /// * `Err(DomainError)` - Insert failed
    async fn insert_refresh(&self, record: RefreshRecord) -> Result<RefreshRecord, DomainError>;

    /// List all unexpired refresh records for a user.
    ///
    /// Used for membership checks and session listings.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<RefreshRecord>, DomainError>;

    /// Atomically swap one refresh record for another.
    ///
    /// Compare-and-delete-then-insert: the record matching `old_hash`
    /// is deleted and `new_record` inserted as a single atomic unit.
    /// If `old_hash` is not currently present the call reports
    /// [`ReplaceOutcome::NotFound`] and performs no insert, so a stale
    /// or duplicate rotation attempt can neither resurrect nor
    /// duplicate a session record.
    ///
    /// A plain read-then-write sequence is insufficient under
    /// concurrency; implementations must use a single conditional
    /// delete gated on row match, executed before the insert, inside
    /// one transaction (or an equivalent critical section).
    async fn replace_if_present(
        &self,
        old_hash: &str,
        new_record: RefreshRecord,
    ) -> Result<ReplaceOutcome, DomainError>;

    /// Delete all refresh records for a user.
    ///
    /// Used by logout and security-incident flows.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn revoke_all(&self, user_id: i64) -> Result<usize, DomainError>;
}
