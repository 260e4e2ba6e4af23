use crate::api::handlers::posts::types::Post;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(ToSchema, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    /// Only present when the request asked for `?posts=true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<Post>>,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct UserData {
    pub data: UserProfile,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct UserListData {
    pub data: Vec<UserProfile>,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct IncludePostsParams {
    /// Embed each user's posts when set to `true`.
    pub posts: Option<String>,
}
