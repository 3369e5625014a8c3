//! Refresh gate for session-style endpoints.
//!
//! On access-credential failure, attempts exactly one rotation using the
//! refresh credential before rejecting. Per request:
//!
//! - Start: read both credentials; no refresh credential is terminal
//!   failure before anything is verified.
//! - VerifyAccess: a missing or failing access credential moves to
//!   rotation; success continues the request unchanged.
//! - AttemptRotate: on success the new pair fully replaces the old in
//!   the response cookies and the request continues with the rotated
//!   identity; on failure the request is rejected with the underlying
//!   kind.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;

use tg_core::domain::entities::token::TokenPair;
use tg_core::errors::AuthError;

use super::access_gate::reject;
use super::cookies::{access_cookie, extract_access, extract_refresh, refresh_cookie};
use super::{AuthContext, TokenServiceWrapper};

/// Refresh gate middleware factory
pub struct RefreshGate {
    service: Arc<dyn TokenServiceWrapper>,
}

impl RefreshGate {
    pub fn new(service: Arc<dyn TokenServiceWrapper>) -> Self {
        Self { service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RefreshGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RefreshGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RefreshGateMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.service),
        }))
    }
}

/// Refresh gate middleware service
pub struct RefreshGateMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<dyn TokenServiceWrapper>,
}

impl<S, B> Service<ServiceRequest> for RefreshGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let tokens = Arc::clone(&self.tokens);

        Box::pin(async move {
            // No refresh credential, no mercy: terminal before any
            // verification is attempted.
            let refresh = match extract_refresh(&req) {
                Some(refresh) => refresh,
                None => return Ok(reject(req, AuthError::MissingRefresh.into())),
            };

            // A missing access credential counts as a verification
            // failure and falls through to rotation.
            let verified = extract_access(&req).and_then(|c| tokens.verify_access(&c).ok());

            if let Some(claims) = verified {
                let context = match AuthContext::from_claims(&claims) {
                    Ok(context) => context,
                    Err(error) => return Ok(reject(req, error.into())),
                };
                req.extensions_mut().insert(context);

                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let (pair, claims) = match tokens.rotate_refresh(&refresh).await {
                Ok(rotated) => rotated,
                // InvalidRefresh and RefreshReuseOrRevoked surface as
                // 401 with their own message; storage faults keep their
                // 5xx mapping and are never coerced into a reuse signal.
                Err(error) => return Ok(reject(req, error.into())),
            };

            let context = match AuthContext::from_claims(&claims) {
                Ok(context) => context,
                Err(error) => return Ok(reject(req, error.into())),
            };
            req.extensions_mut().insert(context);

            let mut res = service.call(req).await?;
            write_rotated_pair(&mut res, &pair);
            Ok(res.map_into_left_body())
        })
    }
}

/// Writes the rotated pair into the response cookies.
///
/// Skipped as a no-op once the response has been committed (the
/// connection handed off to another protocol): the rotation is already
/// persisted server-side, and the client rotates again on its next
/// request with the credentials it still holds.
fn write_rotated_pair<B>(res: &mut ServiceResponse<B>, pair: &TokenPair) {
    if res.response().status() == StatusCode::SWITCHING_PROTOCOLS {
        log::debug!("response already committed, rotated credentials not written");
        return;
    }

    let access = access_cookie(&pair.access_token, pair.access_expires_in);
    let refresh = refresh_cookie(&pair.refresh_token, pair.refresh_expires_in);

    let response = res.response_mut();
    if response.add_cookie(&access).is_err() || response.add_cookie(&refresh).is_err() {
        log::debug!("rotated credentials could not be attached to the response");
    }
}
