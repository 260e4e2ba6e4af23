use crate::api::{
    error::{ErrorMessage, FieldError, ValidationMessage},
    handlers::{auth, health, posts, users},
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::signup::signup,
        auth::login::login,
        users::list,
        users::get_by_id,
        users::delete_self,
        posts::create,
        posts::list,
        posts::search,
        posts::get_by_id,
        posts::update,
        posts::delete,
    ),
    components(schemas(
        auth::types::SignupRequest,
        auth::types::LoginRequest,
        auth::types::TokenData,
        posts::types::Post,
        posts::types::Author,
        posts::types::PostInput,
        posts::types::PostData,
        posts::types::PostListData,
        users::types::UserProfile,
        users::types::UserData,
        users::types::UserListData,
        health::Health,
        FieldError,
        ErrorMessage,
        ValidationMessage,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "users", description = "User profiles"),
        (name = "posts", description = "Posts and ownership"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
