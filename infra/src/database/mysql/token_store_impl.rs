//! MySQL implementation of the TokenStore trait.
//!
//! Persists one row per outstanding refresh credential. The
//! replace-or-reject primitive runs the conditional delete and the
//! insert inside a single transaction: the delete's row match decides
//! whether the rotation may proceed, so two rotations racing on the
//! same credential value cannot both commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tg_core::domain::entities::token::RefreshRecord;
use tg_core::errors::DomainError;
use tg_core::repositories::token::{ReplaceOutcome, TokenStore};

/// MySQL-backed token store
pub struct MySqlTokenStore {
    pool: MySqlPool,
}

impl MySqlTokenStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| storage_error("read id", e))?;

        Ok(RefreshRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid record UUID: {}", e),
            })?,
            user_id: row
                .try_get("user_id")
                .map_err(|e| storage_error("read user_id", e))?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| storage_error("read token_hash", e))?,
            issued_at: row
                .try_get::<DateTime<Utc>, _>("issued_at")
                .map_err(|e| storage_error("read issued_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| storage_error("read expires_at", e))?,
        })
    }
}

/// Maps SQLx failures to the transient storage fault. These surface as
/// 5xx to the caller and are never coerced into an authentication error.
fn storage_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::Storage {
        message: format!("{}: {}", context, e),
    }
}

const INSERT_RECORD: &str = r#"
    INSERT INTO refresh_tokens (id, user_id, token_hash, issued_at, expires_at)
    VALUES (?, ?, ?, ?, ?)
"#;

#[async_trait]
impl TokenStore for MySqlTokenStore {
    async fn insert_refresh(&self, record: RefreshRecord) -> Result<RefreshRecord, DomainError> {
        sqlx::query(INSERT_RECORD)
            .bind(record.id.to_string())
            .bind(record.user_id)
            .bind(&record.token_hash)
            .bind(record.issued_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("insert refresh record", e))?;

        Ok(record)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<RefreshRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, issued_at, expires_at
            FROM refresh_tokens
            WHERE user_id = ? AND expires_at > ?
            ORDER BY issued_at
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .bind(Utc::now())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list refresh records", e))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn replace_if_present(
        &self,
        old_hash: &str,
        new_record: RefreshRecord,
    ) -> Result<ReplaceOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("begin rotation", e))?;

        // Conditional delete gated on row match. Under concurrency the
        // row lock serializes rotations of the same credential; the
        // loser sees zero rows affected.
        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = ?")
            .bind(old_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("consume refresh record", e))?;

        if deleted.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| storage_error("rollback rotation", e))?;
            return Ok(ReplaceOutcome::NotFound);
        }

        sqlx::query(INSERT_RECORD)
            .bind(new_record.id.to_string())
            .bind(new_record.user_id)
            .bind(&new_record.token_hash)
            .bind(new_record.issued_at)
            .bind(new_record.expires_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("insert rotated record", e))?;

        tx.commit()
            .await
            .map_err(|e| storage_error("commit rotation", e))?;

        Ok(ReplaceOutcome::Replaced)
    }

    async fn revoke_all(&self, user_id: i64) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("revoke user records", e))?;

        Ok(result.rows_affected() as usize)
    }
}
