//! Main token service implementation

use chrono::Duration;
use sha2::{Digest, Sha256};

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{Claims, RefreshRecord, TokenKind, TokenPair};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::token::{ReplaceOutcome, TokenStore};

use super::codec::CredentialCodec;
use super::config::TokenServiceConfig;

/// Hashes a credential value for storage lookup.
///
/// The store is keyed by this hash; raw token material never reaches
/// the persistence layer.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Service orchestrating the credential codec and the token store:
/// issues credential pairs, verifies access credentials, and rotates
/// refresh credentials.
pub struct TokenService<S: TokenStore> {
    store: S,
    config: TokenServiceConfig,
    codec: CredentialCodec,
}

impl<S: TokenStore> TokenService<S> {
    pub fn new(store: S, config: TokenServiceConfig) -> Self {
        let codec = CredentialCodec::new(&config.jwt_secret);
        Self {
            store,
            config,
            codec,
        }
    }

    fn access_ttl(&self) -> Duration {
        Duration::minutes(self.config.access_token_expiry_minutes)
    }

    fn refresh_ttl(&self) -> Duration {
        Duration::hours(self.config.refresh_token_expiry_hours)
    }

    /// Mints a refresh credential and its matching store record.
    ///
    /// The record is not persisted here; the caller decides whether it
    /// goes in via `insert_refresh` (initial issuance) or
    /// `replace_if_present` (rotation).
    fn mint_refresh(&self, identity: &Identity) -> Result<(String, RefreshRecord), TokenError> {
        let (credential, claims) = self
            .codec
            .issue(identity, self.refresh_ttl(), TokenKind::Refresh)?;
        let record = RefreshRecord::new(identity.user_id, hash_token(&credential), claims.expires_at());
        Ok((credential, record))
    }

    /// Issues the initial access/refresh pair for a freshly
    /// authenticated identity (called by the login flow).
    pub async fn issue_initial_pair(&self, identity: &Identity) -> Result<TokenPair, DomainError> {
        let (access, _) = self
            .codec
            .issue(identity, self.access_ttl(), TokenKind::Access)?;
        let (refresh, record) = self.mint_refresh(identity)?;

        self.store.insert_refresh(record).await?;

        Ok(TokenPair::new(access, refresh))
    }

    /// Verifies an access credential and returns its claims.
    ///
    /// Stateless: validity is fully determined by signature, kind, and
    /// expiry, never checked against storage. A refresh credential
    /// presented here is rejected as malformed; otherwise its long TTL
    /// would let it bypass the access window and outlive revocation.
    pub fn verify_access(&self, credential: &str) -> Result<Claims, AuthError> {
        self.codec
            .verify(credential, TokenKind::Access)
            .map_err(|e| match e {
                TokenError::Expired => AuthError::ExpiredAccess,
                _ => AuthError::MalformedAccess,
            })
    }

    /// Rotates a refresh credential: consumes the old store record and
    /// returns a freshly minted pair plus the claims of the new access
    /// credential.
    ///
    /// Behaves as a single atomic unit: the only mutation is the store's
    /// compare-and-delete-then-insert, so when two callers race on the
    /// same credential value exactly one rotation succeeds and the other
    /// observes [`AuthError::RefreshReuseOrRevoked`].
    pub async fn rotate_refresh(
        &self,
        old_credential: &str,
    ) -> Result<(TokenPair, Claims), DomainError> {
        // Signature/expiry check first; failures here are routine, not
        // a reuse signal.
        let old_claims = self
            .codec
            .verify(old_credential, TokenKind::Refresh)
            .map_err(|_| AuthError::InvalidRefresh)?;
        let identity = old_claims
            .identity()
            .map_err(|_| AuthError::InvalidRefresh)?;

        // The new refresh credential is minted before the swap; if the
        // swap loses, it was never persisted and is discarded.
        let (new_refresh, new_record) = self.mint_refresh(&identity)?;

        match self
            .store
            .replace_if_present(&hash_token(old_credential), new_record)
            .await?
        {
            ReplaceOutcome::NotFound => {
                // Well-formed credential with no store record: prior
                // consumption or revocation. Audit with identifiers
                // only, no token material.
                tracing::warn!(
                    user_id = identity.user_id,
                    "refresh credential reuse or revoked-session replay detected"
                );
                Err(AuthError::RefreshReuseOrRevoked.into())
            }
            ReplaceOutcome::Replaced => {
                let (access, access_claims) =
                    self.codec
                        .issue(&identity, self.access_ttl(), TokenKind::Access)?;
                Ok((TokenPair::new(access, new_refresh), access_claims))
            }
        }
    }

    /// Lists the outstanding refresh sessions for a user.
    pub async fn active_sessions(&self, user_id: i64) -> Result<Vec<RefreshRecord>, DomainError> {
        self.store.list_by_user(user_id).await
    }

    /// Deletes every refresh record for a user (logout, incident response).
    pub async fn revoke_all(&self, user_id: i64) -> Result<usize, DomainError> {
        self.store.revoke_all(user_id).await
    }
}
