//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user endpoints, the health probes and the schema
//! wrappers from [`crate::inbound::http::schemas`]. The document is served by
//! Swagger UI in debug builds and printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorSchema, UserIdSchema, UserSchema};
use crate::inbound::http::users::CreateUserRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        description = "Create, list, fetch and delete users.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserSchema, UserIdSchema, ErrorSchema, CreateUserRequest)),
    tags(
        (name = "users", description = "User directory operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_user_and_health_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/users", "/users/{id}", "/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn users_collection_supports_post_and_get() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/users").expect("/users path");
        assert!(item.post.is_some());
        assert!(item.get.is_some());
        let member = doc.paths.paths.get("/users/{id}").expect("/users/{id} path");
        assert!(member.get.is_some());
        assert!(member.delete.is_some());
    }

    #[test]
    fn registers_schema_wrappers() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        for name in ["User", "UserId", "Error", "CreateUserRequest"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
