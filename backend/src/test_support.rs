//! Fixtures shared by integration tests.
//!
//! Compiled only with the `test-support` feature, which the crate enables
//! for its own dev builds.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::{Value, json};

pub use crate::domain::ports::UserStoreReset;
use crate::Trace;
use crate::domain::UsersService;
use crate::domain::ports::UserRepository;
use crate::inbound::http::routes::configure_user_routes;
use crate::inbound::http::state::HttpState;

/// Build handler state over `repository`, keeping the concrete handle so the
/// caller can reset it between cases.
pub fn http_state_for<R>(repository: Arc<R>) -> HttpState
where
    R: UserRepository + 'static,
{
    HttpState::from_service(Arc::new(UsersService::new(repository)))
}

/// App exposing the user routes behind the trace middleware.
pub fn user_routes_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_user_routes)
}

/// A valid creation body; `overrides` replaces matching keys.
///
/// # Examples
/// ```
/// use roster::test_support::valid_user;
/// use serde_json::json;
///
/// let body = valid_user(json!({ "name": "Bob" }));
/// assert_eq!(body["name"], "Bob");
/// assert_eq!(body["email"], "alice@example.com");
/// ```
pub fn valid_user(overrides: Value) -> Value {
    let mut body = json!({ "name": "Alice", "email": "alice@example.com" });
    if let (Some(target), Value::Object(changes)) = (body.as_object_mut(), overrides) {
        target.extend(changes);
    }
    body
}

/// Email values that must be rejected. `None` stands for an absent field.
pub fn invalid_email_samples() -> Vec<Option<Value>> {
    vec![
        Some(json!("")),
        Some(json!("plainaddress")),
        Some(json!("@no-local-part.com")),
        Some(json!("missing-at-sign.com")),
        Some(json!("missing-domain@")),
        Some(json!("spaces are@invalid.com")),
        Some(json!("missing-tld@domain")),
        Some(Value::Null),
        None,
        Some(json!(12345)),
    ]
}
