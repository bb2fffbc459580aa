//! Credential extraction from requests.
//!
//! # Responsibility
//! - Pull the bearer credential out of the `Authorization` header.
//! - Reject malformed headers before a handler runs.
//!
//! The credential itself is opaque here; only the identity source can
//! judge it.

use crate::error::ApiError;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// Bearer credential taken verbatim from the `Authorization` header.
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".to_string()))?;
        let value = header
            .to_str()
            .map_err(|_| ApiError::Unauthorized("malformed Authorization header".to_string()))?;
        match value.strip_prefix("Bearer ") {
            Some(token) if !token.is_empty() => Ok(Self(token.to_string())),
            _ => Err(ApiError::Unauthorized(
                "Authorization header must be `Bearer <token>`".to_string(),
            )),
        }
    }
}
