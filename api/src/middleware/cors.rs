//! CORS middleware configuration for cross-origin requests.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

/// Creates a CORS middleware instance configured for the current
/// environment.
///
/// Development is permissive for local testing; production restricts
/// origins to the `ALLOWED_ORIGINS` environment variable. Credentials
/// are always supported since both credential cookies ride on
/// cross-origin requests from the web client.
pub fn create_cors() -> Cors {
    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .supports_credentials()
        .max_age(3600);

    if environment == "production" {
        let mut cors = cors;
        if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
            for origin in allowed_origins.split(',').map(str::trim) {
                if !origin.is_empty() {
                    log::info!("Adding allowed origin: {}", origin);
                    cors = cors.allowed_origin(origin);
                }
            }
        }
        cors
    } else {
        log::info!("Configuring CORS for development environment");
        cors.allow_any_origin()
    }
}
