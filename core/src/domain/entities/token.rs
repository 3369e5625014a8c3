//! Token entities for the rotating access/refresh credential pair.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::{Identity, Role};

/// Access token expiration time (1 hour)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Refresh token expiration time (24 hours)
pub const REFRESH_TOKEN_EXPIRY_HOURS: i64 = 24;

/// JWT issuer
pub const JWT_ISSUER: &str = "tokengate";

/// JWT audience
pub const JWT_AUDIENCE: &str = "tokengate-api";

/// Credential kind minted into every claim set.
///
/// Access and refresh credentials share a signing key and claim shape;
/// this discriminator is what keeps them from standing in for each
/// other at verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Credential kind (access or refresh)
    pub kind: TokenKind,

    /// User role
    pub role: Role,

    /// Whether the user is verified
    pub is_verified: bool,
}

impl Claims {
    /// Creates claims embedding the given identity with `exp = now + ttl`.
    pub fn with_ttl(identity: &Identity, ttl: Duration, kind: TokenKind) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: identity.user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            kind,
            role: identity.role,
            is_verified: identity.is_verified,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<i64, std::num::ParseIntError> {
        self.sub.parse()
    }

    /// Reconstructs the identity payload embedded at issuance
    pub fn identity(&self) -> Result<Identity, std::num::ParseIntError> {
        Ok(Identity {
            user_id: self.user_id()?,
            role: self.role,
            is_verified: self.is_verified,
        })
    }

    /// Expiry as a UTC timestamp, for persisting the matching store record
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// Refresh token record persisted in the token store.
///
/// One record per outstanding refresh credential. There is no revoked
/// flag: consuming a credential deletes its record, so a repeated
/// presentation of the same value fails closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User ID this credential belongs to
    pub user_id: i64,

    /// SHA-256 hash of the credential value
    pub token_hash: String,

    /// Timestamp when the credential was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the credential expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshRecord {
    pub fn new(user_id: i64, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            issued_at: Utc::now(),
            expires_at,
        }
    }

    /// Checks if the record has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access credential (short TTL, stateless)
    pub access_token: String,

    /// Signed refresh credential (long TTL, server-tracked)
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: ACCESS_TOKEN_EXPIRY_MINUTES * 60,
            refresh_expires_in: REFRESH_TOKEN_EXPIRY_HOURS * 60 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_identity() -> Identity {
        Identity::new(42, Role::User, true)
    }

    #[test]
    fn test_claims_embed_identity() {
        let claims = Claims::with_ttl(&test_identity(), Duration::minutes(60), TokenKind::Access);

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.role, Role::User);
        assert!(claims.is_verified);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_user_id_parsing() {
        let claims = Claims::with_ttl(&test_identity(), Duration::minutes(60), TokenKind::Access);
        assert_eq!(claims.user_id().unwrap(), 42);

        let identity = claims.identity().unwrap();
        assert_eq!(identity, test_identity());
    }

    #[test]
    fn test_claims_expiration() {
        let claims = Claims::with_ttl(&test_identity(), Duration::minutes(-5), TokenKind::Access);
        assert!(claims.is_expired());
    }

    #[test]
    fn test_claims_unique_jti() {
        let identity = test_identity();
        let a = Claims::with_ttl(&identity, Duration::minutes(60), TokenKind::Access);
        let b = Claims::with_ttl(&identity, Duration::minutes(60), TokenKind::Access);
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_token_kind_wire_form() {
        assert_eq!(
            serde_json::to_string(&TokenKind::Access).unwrap(),
            "\"access\""
        );
        assert_eq!(
            serde_json::to_string(&TokenKind::Refresh).unwrap(),
            "\"refresh\""
        );
    }

    #[test]
    fn test_refresh_record_creation() {
        let expires_at = Utc::now() + Duration::hours(REFRESH_TOKEN_EXPIRY_HOURS);
        let record = RefreshRecord::new(42, "hashed_token_value".to_string(), expires_at);

        assert_eq!(record.user_id, 42);
        assert_eq!(record.token_hash, "hashed_token_value");
        assert!(!record.is_expired());
    }

    #[test]
    fn test_refresh_record_expiration() {
        let record = RefreshRecord::new(42, "hash".to_string(), Utc::now() - Duration::hours(1));
        assert!(record.is_expired());
    }

    #[test]
    fn test_token_pair_expiry_seconds() {
        let pair = TokenPair::new("access".to_string(), "refresh".to_string());

        assert_eq!(pair.access_expires_in, 60 * 60);
        assert_eq!(pair.refresh_expires_in, 24 * 60 * 60);
    }

    #[test]
    fn test_token_pair_serialization() {
        let pair = TokenPair::new("access".to_string(), "refresh".to_string());

        let json = serde_json::to_string(&pair).unwrap();
        let deserialized: TokenPair = serde_json::from_str(&json).unwrap();

        assert_eq!(pair, deserialized);
    }
}
