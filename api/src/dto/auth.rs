//! Request/response DTOs for the auth routes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tg_core::domain::entities::token::{RefreshRecord, TokenPair};
use crate::middleware::AuthContext;

/// Body for POST /api/v1/auth/refresh
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// New credential pair returned by the refresh endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthTokensResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_in: i64,
    pub refresh_expires_in: i64,
}

impl From<TokenPair> for AuthTokensResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            access_expires_in: pair.access_expires_in,
            refresh_expires_in: pair.refresh_expires_in,
        }
    }
}

/// Identity claims exposed to authenticated callers
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub user_id: i64,
    pub role: String,
    pub is_verified: bool,
}

impl From<&AuthContext> for IdentityResponse {
    fn from(auth: &AuthContext) -> Self {
        Self {
            user_id: auth.user_id,
            role: auth.role.to_string(),
            is_verified: auth.is_verified,
        }
    }
}

/// One outstanding refresh session; carries timestamps only, never
/// token material.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<&RefreshRecord> for SessionInfo {
    fn from(record: &RefreshRecord) -> Self {
        Self {
            id: record.id.to_string(),
            issued_at: record.issued_at,
            expires_at: record.expires_at,
        }
    }
}

/// Body for GET /api/v1/auth/sessions
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionInfo>,
}

/// Body for POST /api/v1/auth/logout
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
    pub revoked_sessions: usize,
}
