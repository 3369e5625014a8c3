use actix_web::HttpResponse;

use crate::dto::auth::IdentityResponse;
use crate::middleware::AuthContext;

/// Returns the identity claims attached by whichever gate the route
/// sits behind. Serves GET /api/v1/me (access gate) and
/// GET /web/session (refresh gate).
pub async fn current_identity(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(IdentityResponse::from(&auth))
}
