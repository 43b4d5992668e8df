//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror their wire
//! shape and live in the inbound layer where framework concerns belong.

use serde::Serialize;
use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::UserId`].
///
/// A number for the in-memory backend, a 24-character hex string for the
/// document store.
#[derive(Serialize, ToSchema)]
#[serde(untagged)]
#[schema(as = UserId)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub enum UserIdSchema {
    /// Sequential identifier.
    Sequential(u64),
    /// Document-store identifier.
    Document(String),
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Backend-assigned identifier.
    #[schema(example = 1)]
    id: UserIdSchema,
    /// Trimmed user name.
    #[schema(example = "Alice")]
    name: String,
    /// Trimmed email address.
    #[schema(example = "alice@example.com")]
    email: String,
}

/// OpenAPI schema for error responses.
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message returned to clients.
    #[schema(example = "User not found.")]
    message: String,
}
