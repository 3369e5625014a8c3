//! Access gate for API-style endpoints.
//!
//! Requires a present, valid access credential; on success the identity
//! claims are attached to the request context. Never attempts rotation:
//! callers needing silent refresh sit behind the refresh gate instead.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures_util::future::LocalBoxFuture;

use tg_core::errors::AuthError;

use crate::handlers::error::ApiError;

use super::cookies::extract_access;
use super::{AuthContext, TokenServiceWrapper};

/// Builds the gate's short-circuit response without touching the inner
/// service.
pub(super) fn reject<B>(req: ServiceRequest, error: ApiError) -> ServiceResponse<EitherBody<B>> {
    let response = error.error_response().map_into_right_body();
    req.into_response(response)
}

/// Access gate middleware factory
pub struct AccessGate {
    service: Arc<dyn TokenServiceWrapper>,
}

impl AccessGate {
    pub fn new(service: Arc<dyn TokenServiceWrapper>) -> Self {
        Self { service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGateMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.service),
        }))
    }
}

/// Access gate middleware service
pub struct AccessGateMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<dyn TokenServiceWrapper>,
}

impl<S, B> Service<ServiceRequest> for AccessGateMiddleware<S>
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
            let credential = match extract_access(&req) {
                Some(credential) => credential,
                None => return Ok(reject(req, AuthError::MissingAccess.into())),
            };

            let claims = match tokens.verify_access(&credential) {
                Ok(claims) => claims,
                Err(error) => return Ok(reject(req, error.into())),
            };

            let context = match AuthContext::from_claims(&claims) {
                Ok(context) => context,
                Err(error) => return Ok(reject(req, error.into())),
            };

            req.extensions_mut().insert(context);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
