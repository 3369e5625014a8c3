use actix_web::{web, HttpResponse};

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::ApiError;
use crate::middleware::cookies::{clear_cookie, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::middleware::{AuthContext, TokenServiceWrapper};

/// Handler for POST /api/v1/auth/logout
///
/// Revokes every outstanding refresh session for the authenticated user
/// and clears both credential cookies. Sits behind the access gate.
pub async fn logout(
    service: web::Data<dyn TokenServiceWrapper>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let revoked = service.revoke_all(auth.user_id).await?;

    log::info!("user {} logged out, {} session(s) revoked", auth.user_id, revoked);

    Ok(HttpResponse::Ok()
        .cookie(clear_cookie(ACCESS_COOKIE))
        .cookie(clear_cookie(REFRESH_COOKIE))
        .json(LogoutResponse {
            message: "Logged out successfully".to_string(),
            revoked_sessions: revoked,
        }))
}
