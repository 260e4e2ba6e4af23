//! Request/response types for post endpoints.

use crate::api::error::FieldError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A post as returned by the API.
#[derive(ToSchema, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Author>,
}

/// Post author, attached when `?user=true`.
#[derive(ToSchema, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    pub display_name: String,
    pub email: String,
}

/// Body for creating or updating a post.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PostInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Response envelope for a single post.
#[derive(ToSchema, Serialize, Debug)]
pub struct PostData {
    pub data: Post,
}

/// Response envelope for a list of posts.
#[derive(ToSchema, Serialize, Debug)]
pub struct PostListData {
    pub data: Vec<Post>,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct IncludeUserParams {
    /// Attach the post author when set to "true".
    pub user: Option<String>,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring to look for in titles and contents, case-insensitive.
    pub q: Option<String>,
    /// Attach the post author when set to "true".
    pub user: Option<String>,
}

pub(super) fn validate_post(input: &PostInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if input.title.is_empty() {
        errors.push(FieldError::required("title"));
    }

    if input.content.is_empty() {
        errors.push(FieldError::required("content"));
    }

    errors
}
