//! Request gates and supporting middleware.

pub mod access_gate;
pub mod cookies;
pub mod cors;
pub mod refresh_gate;

use std::future::{ready, Ready};

use actix_web::{error::Error, FromRequest, HttpMessage, HttpRequest};
use async_trait::async_trait;

use tg_core::domain::entities::identity::Role;
use tg_core::domain::entities::token::{Claims, RefreshRecord, TokenPair};
use tg_core::errors::{AuthError, DomainError};
use tg_core::repositories::TokenStore;
use tg_core::services::token::TokenService;

use crate::handlers::error::ApiError;

pub use access_gate::AccessGate;
pub use cookies::{ACCESS_COOKIE, REFRESH_COOKIE};
pub use cors::create_cors;
pub use refresh_gate::RefreshGate;

/// Object-safe handle over the token service, so gates and handlers can
/// hold `Arc<dyn TokenServiceWrapper>` regardless of the backing store.
#[async_trait]
pub trait TokenServiceWrapper: Send + Sync {
    fn verify_access(&self, credential: &str) -> Result<Claims, AuthError>;

    async fn rotate_refresh(&self, credential: &str) -> Result<(TokenPair, Claims), DomainError>;

    async fn active_sessions(&self, user_id: i64) -> Result<Vec<RefreshRecord>, DomainError>;

    async fn revoke_all(&self, user_id: i64) -> Result<usize, DomainError>;
}

#[async_trait]
impl<S: TokenStore + 'static> TokenServiceWrapper for TokenService<S> {
    fn verify_access(&self, credential: &str) -> Result<Claims, AuthError> {
        TokenService::verify_access(self, credential)
    }

    async fn rotate_refresh(&self, credential: &str) -> Result<(TokenPair, Claims), DomainError> {
        TokenService::rotate_refresh(self, credential).await
    }

    async fn active_sessions(&self, user_id: i64) -> Result<Vec<RefreshRecord>, DomainError> {
        TokenService::active_sessions(self, user_id).await
    }

    async fn revoke_all(&self, user_id: i64) -> Result<usize, DomainError> {
        TokenService::revoke_all(self, user_id).await
    }
}

/// Authenticated identity injected into requests by the gates.
///
/// The sole interface downstream handlers see; they must not re-derive
/// identity themselves.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from the verified claims
    pub user_id: i64,
    /// User role
    pub role: Role,
    /// Whether the user's account is verified
    pub is_verified: bool,
    /// JWT ID for audit tracking
    pub jti: String,
}

impl AuthContext {
    /// Creates an authentication context from verified claims
    pub fn from_claims(claims: &Claims) -> Result<Self, AuthError> {
        let user_id = claims.user_id().map_err(|_| AuthError::MalformedAccess)?;
        Ok(Self {
            user_id,
            role: claims.role,
            is_verified: claims.is_verified,
            jti: claims.jti.clone(),
        })
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(AuthError::MissingAccess).into());

        ready(result)
    }
}
