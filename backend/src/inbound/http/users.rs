//! User handlers.
//!
//! ```text
//! POST   /users        {"name":"Alice","email":"alice@example.com"}
//! GET    /users
//! GET    /users/{id}
//! DELETE /users/{id}
//! ```
//!
//! Identifiers are taken from the path as text; the repository behind
//! [`HttpState`] decides what a valid identifier looks like.

use std::borrow::Cow;

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Error, NewUser, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /users`.
///
/// Fields are read as raw JSON so that a wrongly typed value fails
/// validation with the field's message instead of a deserialisation error.
/// A non-zero number or `true` given as `name` is stored as its text;
/// `null`, `false`, `0`, arrays and objects count as missing. `email` must
/// be a string. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Alice")]
    pub name: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "alice@example.com")]
    pub email: Option<Value>,
}

/// Text form of a submitted name, or `None` when it counts as missing.
fn name_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) if number.as_f64() != Some(0.0) => {
            Some(Cow::Owned(number.to_string()))
        }
        Value::Bool(true) => Some(Cow::Borrowed("true")),
        _ => None,
    }
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        let name = value.name.as_ref().and_then(name_text);
        Self::try_from_parts(
            name.as_deref(),
            value.email.as_ref().and_then(Value::as_str),
        )
    }
}

fn map_validation_error(err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// Create a user.
///
/// A missing or unparsable body is treated as `{}` and so fails on the name.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Invalid name or email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: Option<web::Json<CreateUserRequest>>,
) -> ApiResult<HttpResponse> {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    let new_user = NewUser::try_from(request).map_err(map_validation_error)?;
    let created = state.users_command.create_user(new_user).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List every user in creation order.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users_query.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = state.users_query.get_user(id.as_str()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Delete one user. Success has an empty body.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.users_command.delete_user(id.as_str()).await?;
    Ok(HttpResponse::NoContent().finish())
}
