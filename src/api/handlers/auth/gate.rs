//! Request gate for protected routes.
//!
//! The middleware verifies the bearer token once and stores the proven user
//! id in request extensions, handlers pick it up through [`VerifiedUser`]
//! without touching the token again.

use crate::api::{error::Error, handlers::auth::token::TokenCodec};
use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
    Extension,
};
use std::sync::Arc;

/// User id proven by the bearer token, inserted by [`require_auth`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerifiedUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for VerifiedUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .copied()
            .ok_or(Error::MissingToken)
    }
}

/// Require a valid bearer token before the request reaches its handler.
///
/// # Errors
/// Returns [`Error::MissingToken`] when the `Authorization` header is absent
/// or not a `Bearer` scheme, and [`Error::InvalidToken`] when the token fails
/// verification. Both short-circuit with a 401.
pub async fn require_auth(
    Extension(codec): Extension<Arc<TokenCodec>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Error> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = bearer_token(header)?;
    let user_id = codec.verify(token)?;

    request.extensions_mut().insert(VerifiedUser(user_id));

    Ok(next.run(request).await)
}

// The scheme prefix is matched exactly, "bearer" or "Bearer:" do not count.
fn bearer_token(header: Option<&str>) -> Result<&str, Error> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(Error::MissingToken)
}
