//! Error taxonomy for the API.
//!
//! Every failure a handler can produce maps to exactly one variant, and every
//! variant maps to exactly one HTTP status. Responses always carry a JSON body
//! with a single `error` key so clients never have to parse two shapes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// A single validation failure, reported per field.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn required(field: &str) -> Self {
        Self::new(field, "required")
    }

    pub(crate) fn too_short(field: &str, min: usize) -> Self {
        Self::new(field, format!("must be at least {min} characters"))
    }
}

/// Error body for non-validation failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorMessage {
    pub error: String,
}

/// Error body for validation failures, one entry per offending field.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationMessage {
    pub error: Vec<FieldError>,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing token")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("invalid password")]
    InvalidPassword,

    #[error("user not found")]
    UserNotFound,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("post not found")]
    NotFound,

    #[error("you can only modify or delete posts you own")]
    Forbidden,

    #[error("invalid id")]
    InvalidId,

    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("an unknown error has occurred, please try again later")]
    Unknown(#[from] anyhow::Error),
}

impl Error {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken | Self::InvalidPassword => {
                StatusCode::UNAUTHORIZED
            }
            Self::UserNotFound | Self::NotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidId | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 400 for requests that arrive without a JSON payload.
    pub(crate) fn missing_payload() -> Self {
        Self::Validation(vec![FieldError::new("body", "missing payload")])
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        // The cause stays in the logs, the client only sees the opaque message.
        if let Self::Unknown(source) = &self {
            error!("Internal error: {source:#}");
        }

        let body = match self {
            Self::Validation(fields) => Json(ValidationMessage { error: fields }).into_response(),
            other => Json(ErrorMessage {
                error: other.to_string(),
            })
            .into_response(),
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use axum::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::InvalidPassword.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(Error::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(Error::UserAlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(Error::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(Error::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::Validation(Vec::new()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::Unknown(anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = Error::UserNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "user not found" }));
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let response = Error::Validation(vec![
            FieldError::required("email"),
            FieldError::too_short("password", 6),
        ])
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": [
                    { "field": "email", "message": "required" },
                    { "field": "password", "message": "must be at least 6 characters" },
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_never_leaks_cause() {
        let response = Error::Unknown(anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("an unknown error has occurred"));
        assert!(!text.contains("connection refused"));
    }

    #[test]
    fn test_from_anyhow() {
        let err: Error = anyhow!("boom").into();
        assert!(matches!(err, Error::Unknown(_)));
    }
}
