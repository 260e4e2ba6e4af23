//! User endpoints.
//!
//! Accounts come to life through [`super::auth::signup`]; this module covers
//! reading profiles and deleting the caller's own account. There is no route
//! to delete an arbitrary user, the token decides whose account goes.

use crate::api::{
    error::{Error, ErrorMessage},
    handlers::{
        auth::gate::VerifiedUser,
        flag_enabled,
        users::types::{IncludePostsParams, UserData, UserListData},
    },
};
use axum::{
    extract::{rejection::PathRejection, Extension, Path, Query},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;

pub(crate) mod storage;
pub mod types;

#[utoipa::path(
    get,
    path = "/user/list",
    params(IncludePostsParams),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = UserListData),
        (status = 401, description = "Missing or invalid token", body = ErrorMessage),
        (status = 500, description = "Unexpected failure", body = ErrorMessage)
    ),
    tag = "users"
)]
pub async fn list(
    pool: Extension<PgPool>,
    Query(params): Query<IncludePostsParams>,
) -> Result<Json<UserListData>, Error> {
    let users = storage::list_users(&pool, flag_enabled(params.posts.as_deref())).await?;

    Ok(Json(UserListData { data: users }))
}

#[utoipa::path(
    get,
    path = "/user/{id}",
    params(
        ("id" = i64, Path, description = "User id"),
        IncludePostsParams
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The user", body = UserData),
        (status = 400, description = "Non-numeric id", body = ErrorMessage),
        (status = 401, description = "Missing or invalid token", body = ErrorMessage),
        (status = 404, description = "No such user", body = ErrorMessage),
        (status = 500, description = "Unexpected failure", body = ErrorMessage)
    ),
    tag = "users"
)]
pub async fn get_by_id(
    pool: Extension<PgPool>,
    path: Result<Path<i64>, PathRejection>,
    Query(params): Query<IncludePostsParams>,
) -> Result<Json<UserData>, Error> {
    let Path(user_id) = path.map_err(|_| Error::InvalidId)?;

    let user = storage::get_user(&pool, user_id, flag_enabled(params.posts.as_deref()))
        .await?
        .ok_or(Error::UserNotFound)?;

    Ok(Json(UserData { data: user }))
}

#[utoipa::path(
    delete,
    path = "/user",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorMessage),
        (status = 500, description = "Unexpected failure", body = ErrorMessage)
    ),
    tag = "users"
)]
pub async fn delete_self(
    pool: Extension<PgPool>,
    user: VerifiedUser,
) -> Result<StatusCode, Error> {
    storage::delete_user(&pool, user.0).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
        routing::get,
        Router,
    };
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
    use std::time::Duration;
    use tower::ServiceExt;

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

    fn app() -> Router {
        Router::new()
            .route("/user/:id", get(get_by_id))
            .layer(Extension(unreachable_pool()))
    }

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn non_numeric_id_is_invalid_id() {
        let request = Request::builder()
            .uri("/user/abc")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("invalid id"));
    }

    #[tokio::test]
    async fn database_failure_is_opaque() {
        let request = Request::builder()
            .uri("/user/1")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("an unknown error has occurred"));
        assert!(!body.contains("connection"));
    }

    #[tokio::test]
    async fn delete_requires_a_verified_caller() {
        // Without the middleware there is no VerifiedUser extension.
        let router = Router::new()
            .route("/user", axum::routing::delete(delete_self))
            .layer(Extension(unreachable_pool()));

        let request = Request::builder()
            .method("DELETE")
            .uri("/user")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
