//! Application route wiring.

use std::sync::Arc;

use actix_web::web;

use crate::middleware::{AccessGate, RefreshGate, TokenServiceWrapper};
use crate::routes;

/// Wires the auth routes and gates onto an application.
///
/// Gates receive the token service by explicit constructor injection;
/// handlers resolve the same handle from app data.
pub fn configure(cfg: &mut web::ServiceConfig, tokens: Arc<dyn TokenServiceWrapper>) {
    cfg.app_data(web::Data::from(Arc::clone(&tokens)))
        .service(
            web::scope("/api/v1")
                // Body-based refresh sits outside the gates: its whole
                // point is to work with an expired access credential.
                .route("/auth/refresh", web::post().to(routes::auth::refresh_token))
                .service(
                    web::scope("/auth")
                        .wrap(AccessGate::new(Arc::clone(&tokens)))
                        .route("/logout", web::post().to(routes::auth::logout))
                        .route("/sessions", web::get().to(routes::auth::sessions)),
                )
                .service(
                    web::scope("/me")
                        .wrap(AccessGate::new(Arc::clone(&tokens)))
                        .route("", web::get().to(routes::session::current_identity)),
                ),
        )
        .service(
            web::scope("/web")
                .wrap(RefreshGate::new(tokens))
                .route("/session", web::get().to(routes::session::current_identity)),
        );
}
