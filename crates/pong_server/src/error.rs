//! API error taxonomy and HTTP mapping.
//!
//! # Responsibility
//! - Give every failure class one HTTP status and one stable error code.
//! - Keep storage details out of response bodies.
//!
//! # See also
//! - docs/architecture/wire-contract.md

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use pong_core::{DeliveryError, MAX_BODY_CHARS};
use serde_json::json;
use thiserror::Error;

/// Central error type for the HTTP surface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error")]
    Internal(String),
}

impl From<DeliveryError> for ApiError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::Unauthenticated => {
                ApiError::Unauthorized("invalid or missing credential".to_string())
            }
            DeliveryError::IdentityUnavailable(detail) => {
                ApiError::ServiceUnavailable(format!("identity service unavailable: {detail}"))
            }
            DeliveryError::UnknownRecipient(name) => {
                ApiError::NotFound(format!("no such user: {name}"))
            }
            DeliveryError::MessageEmpty => {
                ApiError::BadRequest("message must not be empty".to_string())
            }
            DeliveryError::MessageTooLong { chars } => ApiError::BadRequest(format!(
                "message is {chars} chars, limit is {MAX_BODY_CHARS}"
            )),
            DeliveryError::Store(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHORIZED"),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, msg, "SERVICE_UNAVAILABLE")
            }
            ApiError::Internal(detail) => {
                // The detail stays in the log; the wire gets a generic body.
                error!("event=request_failed module=server status=error detail={detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use pong_core::{DeliveryError, RepoError};

    fn status_for(err: DeliveryError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn delivery_errors_map_to_the_documented_statuses() {
        assert_eq!(
            status_for(DeliveryError::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(DeliveryError::IdentityUnavailable("down".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(DeliveryError::UnknownRecipient("ghost".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(DeliveryError::MessageEmpty),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(DeliveryError::MessageTooLong { chars: 141 }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(DeliveryError::Store(RepoError::LockPoisoned)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
