//! Login endpoint.

use crate::api::{
    error::{Error, ErrorMessage, ValidationMessage},
    handlers::auth::{
        flow,
        token::TokenCodec,
        types::{validate_login, LoginRequest, TokenData},
    },
};
use axum::{extract::Extension, http::StatusCode, Json};
use sqlx::PgPool;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted, token returned", body = TokenData),
        (status = 400, description = "Validation error", body = ValidationMessage),
        (status = 401, description = "Wrong password", body = ErrorMessage),
        (status = 404, description = "Unknown email", body = ErrorMessage),
        (status = 500, description = "Unexpected failure", body = ErrorMessage)
    ),
    tag = "auth"
)]
pub async fn login(
    pool: Extension<PgPool>,
    codec: Extension<Arc<TokenCodec>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<(StatusCode, Json<TokenData>), Error> {
    let Some(Json(request)) = payload else {
        return Err(Error::missing_payload());
    };

    let request = request.normalized();

    let errors = validate_login(&request);
    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    let token = flow::login(&*pool, &codec, &request).await?;

    Ok((StatusCode::OK, Json(TokenData { data: token })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
    use std::time::Duration;

    fn unreachable_pool() -> PgPool {
        let options = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("invalid")
            .database("invalid")
            .ssl_mode(PgSslMode::Disable);
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy_with(options)
    }

    fn test_codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(&SecretString::from("login-test-secret".to_string())).unwrap())
    }

    #[tokio::test]
    async fn missing_payload_is_a_validation_error() {
        let result = login(Extension(unreachable_pool()), Extension(test_codec()), None).await;

        let err = result.err().unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_email_never_reaches_the_database() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: "123456".to_string(),
        };

        let result = login(
            Extension(unreachable_pool()),
            Extension(test_codec()),
            Some(Json(request)),
        )
        .await;

        match result {
            Err(Error::Validation(fields)) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "email");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn database_failure_is_opaque() {
        let request = LoginRequest {
            email: "a@b.co".to_string(),
            password: "123456".to_string(),
        };

        let result = login(
            Extension(unreachable_pool()),
            Extension(test_codec()),
            Some(Json(request)),
        )
        .await;

        let err = result.err().unwrap();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
