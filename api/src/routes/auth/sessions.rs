use actix_web::{web, HttpResponse};

use crate::dto::auth::{SessionInfo, SessionsResponse};
use crate::handlers::error::ApiError;
use crate::middleware::{AuthContext, TokenServiceWrapper};

/// Handler for GET /api/v1/auth/sessions
///
/// Lists the authenticated user's outstanding refresh sessions.
/// Timestamps only; token material never leaves the store.
pub async fn sessions(
    service: web::Data<dyn TokenServiceWrapper>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let records = service.active_sessions(auth.user_id).await?;

    Ok(HttpResponse::Ok().json(SessionsResponse {
        sessions: records.iter().map(SessionInfo::from).collect(),
    }))
}
