use actix_web::{web, HttpResponse};

use crate::dto::auth::{AuthTokensResponse, RefreshTokenRequest};
use crate::handlers::error::ApiError;
use crate::middleware::TokenServiceWrapper;

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates a refresh credential presented in the request body and
/// returns the new pair. API-style clients that carry tokens themselves
/// use this instead of the cookie-based refresh gate.
///
/// # Errors
/// - 401 Unauthorized: invalid, expired, reused, or revoked refresh token
/// - 503 Service Unavailable: transient storage fault
pub async fn refresh_token(
    service: web::Data<dyn TokenServiceWrapper>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError> {
    let (pair, _claims) = service.rotate_refresh(&request.refresh_token).await?;

    Ok(HttpResponse::Ok().json(AuthTokensResponse::from(pair)))
}
