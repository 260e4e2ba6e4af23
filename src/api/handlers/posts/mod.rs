//! Post endpoints.
//!
//! Reads are open to any authenticated user. Mutations resolve the post
//! first and then apply the ownership policy, so a missing post is always a
//! 404 and someone else's post is always a 403.

use crate::api::{
    error::{Error, ErrorMessage, ValidationMessage},
    handlers::{
        auth::{
            gate::VerifiedUser,
            ownership::{authorize, OwnershipDecision},
        },
        flag_enabled,
        posts::types::{
            validate_post, IncludeUserParams, PostData, PostInput, PostListData, SearchParams,
        },
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
    post,
    path = "/post",
    request_body = PostInput,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Post created", body = PostData),
        (status = 400, description = "Validation error", body = ValidationMessage),
        (status = 401, description = "Missing or invalid token", body = ErrorMessage),
        (status = 500, description = "Unexpected failure", body = ErrorMessage)
    ),
    tag = "posts"
)]
pub async fn create(
    pool: Extension<PgPool>,
    user: VerifiedUser,
    payload: Option<Json<PostInput>>,
) -> Result<(StatusCode, Json<PostData>), Error> {
    let Some(Json(input)) = payload else {
        return Err(Error::missing_payload());
    };

    let errors = validate_post(&input);
    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    let post = storage::insert_post(&pool, user.0, &input.title, &input.content).await?;

    Ok((StatusCode::CREATED, Json(PostData { data: post })))
}

#[utoipa::path(
    get,
    path = "/post/list",
    params(IncludeUserParams),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All posts", body = PostListData),
        (status = 401, description = "Missing or invalid token", body = ErrorMessage),
        (status = 500, description = "Unexpected failure", body = ErrorMessage)
    ),
    tag = "posts"
)]
pub async fn list(
    pool: Extension<PgPool>,
    Query(params): Query<IncludeUserParams>,
) -> Result<Json<PostListData>, Error> {
    let posts = storage::list_posts(&pool, flag_enabled(params.user.as_deref())).await?;

    Ok(Json(PostListData { data: posts }))
}

#[utoipa::path(
    get,
    path = "/post/search",
    params(SearchParams),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Posts matching the search term", body = PostListData),
        (status = 401, description = "Missing or invalid token", body = ErrorMessage),
        (status = 500, description = "Unexpected failure", body = ErrorMessage)
    ),
    tag = "posts"
)]
pub async fn search(
    pool: Extension<PgPool>,
    Query(params): Query<SearchParams>,
) -> Result<Json<PostListData>, Error> {
    let term = params.q.unwrap_or_default();
    let posts = storage::search_posts(&pool, &term, flag_enabled(params.user.as_deref())).await?;

    Ok(Json(PostListData { data: posts }))
}

#[utoipa::path(
    get,
    path = "/post/{id}",
    params(
        ("id" = i64, Path, description = "Post id"),
        IncludeUserParams
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The post", body = PostData),
        (status = 400, description = "Non-numeric id", body = ErrorMessage),
        (status = 401, description = "Missing or invalid token", body = ErrorMessage),
        (status = 404, description = "No such post", body = ErrorMessage),
        (status = 500, description = "Unexpected failure", body = ErrorMessage)
    ),
    tag = "posts"
)]
pub async fn get_by_id(
    pool: Extension<PgPool>,
    path: Result<Path<i64>, PathRejection>,
    Query(params): Query<IncludeUserParams>,
) -> Result<Json<PostData>, Error> {
    let Path(post_id) = path.map_err(|_| Error::InvalidId)?;

    let post = storage::get_post(&pool, post_id, flag_enabled(params.user.as_deref()))
        .await?
        .ok_or(Error::NotFound)?;

    Ok(Json(PostData { data: post }))
}

#[utoipa::path(
    put,
    path = "/post/{id}",
    request_body = PostInput,
    params(("id" = i64, Path, description = "Post id")),
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Post updated"),
        (status = 400, description = "Validation error or non-numeric id"),
        (status = 401, description = "Missing or invalid token", body = ErrorMessage),
        (status = 403, description = "Post belongs to another user", body = ErrorMessage),
        (status = 404, description = "No such post", body = ErrorMessage),
        (status = 500, description = "Unexpected failure", body = ErrorMessage)
    ),
    tag = "posts"
)]
pub async fn update(
    pool: Extension<PgPool>,
    user: VerifiedUser,
    path: Result<Path<i64>, PathRejection>,
    payload: Option<Json<PostInput>>,
) -> Result<StatusCode, Error> {
    let Path(post_id) = path.map_err(|_| Error::InvalidId)?;

    let Some(Json(input)) = payload else {
        return Err(Error::missing_payload());
    };

    let errors = validate_post(&input);
    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    require_owner(&pool, post_id, user).await?;

    storage::update_post(&pool, post_id, &input.title, &input.content).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/post/{id}",
    params(("id" = i64, Path, description = "Post id")),
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 400, description = "Non-numeric id", body = ErrorMessage),
        (status = 401, description = "Missing or invalid token", body = ErrorMessage),
        (status = 403, description = "Post belongs to another user", body = ErrorMessage),
        (status = 404, description = "No such post", body = ErrorMessage),
        (status = 500, description = "Unexpected failure", body = ErrorMessage)
    ),
    tag = "posts"
)]
pub async fn delete(
    pool: Extension<PgPool>,
    user: VerifiedUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, Error> {
    let Path(post_id) = path.map_err(|_| Error::InvalidId)?;

    require_owner(&pool, post_id, user).await?;

    storage::delete_post(&pool, post_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// Existence resolves before ownership, a missing post is 404 and never 403.
async fn require_owner(pool: &PgPool, post_id: i64, caller: VerifiedUser) -> Result<(), Error> {
    let owner_id = storage::find_post_owner(pool, post_id)
        .await?
        .ok_or(Error::NotFound)?;

    match authorize(caller.0, owner_id) {
        OwnershipDecision::Allow => Ok(()),
        OwnershipDecision::Deny => Err(Error::Forbidden),
    }
}
