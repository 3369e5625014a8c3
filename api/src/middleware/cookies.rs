//! Credential transport: cookie names, extraction, and builders.
//!
//! The access credential rides in a readable cookie (or an
//! `Authorization: Bearer` header for API clients); the refresh
//! credential rides in an HTTP-only cookie. Both are opaque strings to
//! this layer.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::dev::ServiceRequest;
use actix_web::http::header::AUTHORIZATION;

/// Readable cookie carrying the access credential
pub const ACCESS_COOKIE: &str = "access_token";

/// HTTP-only cookie carrying the refresh credential
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Extracts the access credential from the cookie or, failing that,
/// the Authorization header.
pub fn extract_access(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(ACCESS_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Extracts the refresh credential from its cookie
pub fn extract_refresh(req: &ServiceRequest) -> Option<String> {
    req.cookie(REFRESH_COOKIE).map(|c| c.value().to_string())
}

pub fn access_cookie(value: &str, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(ACCESS_COOKIE, value.to_string())
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

pub fn refresh_cookie(value: &str, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, value.to_string())
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

/// Expired cookie used to clear a credential on logout
pub fn clear_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name, "")
        .path("/")
        .max_age(Duration::ZERO)
        .finish()
}
