//! End-to-end behaviour of the user routes over the in-memory store.
//!
//! Every case builds its own repository, so cases run in parallel without
//! sharing identifiers.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use roster::domain::TRACE_ID_HEADER;
use roster::outbound::persistence::InMemoryUserRepository;
use roster::test_support::{
    UserStoreReset, http_state_for, invalid_email_samples, user_routes_app, valid_user,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn repository() -> Arc<InMemoryUserRepository> {
    Arc::new(InMemoryUserRepository::new())
}

async fn app_over(
    repository: Arc<InMemoryUserRepository>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(user_routes_app(http_state_for(repository))).await
}

async fn send<S>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

async fn create<S>(app: &S, body: Value) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(app, actix_test::TestRequest::post().uri("/users").set_json(body)).await
}

#[rstest]
#[actix_web::test]
async fn list_starts_empty(repository: Arc<InMemoryUserRepository>) {
    let app = app_over(repository).await;
    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn alice_then_bob_are_listed_exactly(repository: Arc<InMemoryUserRepository>) {
    let app = app_over(repository).await;
    create(&app, valid_user(json!({}))).await;
    create(&app, valid_user(json!({ "name": "Bob", "email": "bob@example.com" }))).await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": 1, "name": "Alice", "email": "alice@example.com" },
            { "id": 2, "name": "Bob", "email": "bob@example.com" }
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn ids_are_sequential_and_never_reused(repository: Arc<InMemoryUserRepository>) {
    let app = app_over(repository).await;
    for expected in 1..=2 {
        let (status, body) = create(&app, valid_user(json!({}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], json!(expected));
    }

    let (status, _) = send(&app, actix_test::TestRequest::delete().uri("/users/2")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = create(&app, valid_user(json!({}))).await;
    assert_eq!(body["id"], json!(3));
}

#[rstest]
#[actix_web::test]
async fn create_then_fetch_returns_trimmed_fields(repository: Arc<InMemoryUserRepository>) {
    let app = app_over(repository).await;
    let (status, created) = create(
        &app,
        json!({ "name": "  John Doe ", "email": " john.doe@example.com " }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "John Doe");
    assert_eq!(created["email"], "john.doe@example.com");

    let uri = format!("/users/{}", created["id"]);
    let (status, fetched) = send(&app, actix_test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[rstest]
#[actix_web::test]
async fn delete_then_fetch_is_not_found(repository: Arc<InMemoryUserRepository>) {
    let app = app_over(repository).await;
    create(&app, valid_user(json!({}))).await;

    let (status, body) = send(&app, actix_test::TestRequest::delete().uri("/users/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/users/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "User not found." }));
}

#[rstest]
#[case("/users/999")]
#[case("/users/abc")]
#[case("/users/-1")]
#[case("/users/+1")]
#[case("/users/1.0")]
#[actix_web::test]
async fn unknown_ids_are_not_found(
    repository: Arc<InMemoryUserRepository>,
    #[case] uri: &str,
) {
    let app = app_over(repository).await;
    create(&app, valid_user(json!({}))).await;

    for request in [
        actix_test::TestRequest::get().uri(uri),
        actix_test::TestRequest::delete().uri(uri),
    ] {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "User not found." }));
    }

    let (_, list) = send(&app, actix_test::TestRequest::get().uri("/users")).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[case(json!(""))]
#[case(json!("   "))]
#[actix_web::test]
async fn blank_name_is_rejected_regardless_of_email(
    repository: Arc<InMemoryUserRepository>,
    #[case] name: Value,
) {
    let app = app_over(repository.clone()).await;
    for email in [json!("alice@example.com"), json!("bad-email")] {
        let (status, body) = create(&app, json!({ "name": name, "email": email })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Name is required." }));
    }
    let (_, list) = send(&app, actix_test::TestRequest::get().uri("/users")).await;
    assert_eq!(list, json!([]));
}

#[rstest]
#[actix_web::test]
async fn numeric_and_true_names_are_stored_as_text(repository: Arc<InMemoryUserRepository>) {
    let app = app_over(repository).await;
    let (status, first) = create(&app, valid_user(json!({ "name": 123 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["name"], "123");

    let (status, second) = create(&app, valid_user(json!({ "name": true }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["name"], "true");

    let (status, body) = create(&app, valid_user(json!({ "name": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Name is required." }));
}

#[rstest]
#[actix_web::test]
async fn invalid_emails_are_rejected(repository: Arc<InMemoryUserRepository>) {
    let app = app_over(repository).await;
    for sample in invalid_email_samples() {
        let body = match &sample {
            Some(email) => json!({ "name": "Alice", "email": email }),
            None => json!({ "name": "Alice" }),
        };
        let (status, response) = create(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "sample {sample:?}");
        assert_eq!(
            response,
            json!({ "message": "A valid email is required." }),
            "sample {sample:?}"
        );
    }
}

#[rstest]
#[actix_web::test]
async fn responses_carry_trace_id(repository: Arc<InMemoryUserRepository>) {
    let app = app_over(repository).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/users/404").to_request(),
    )
    .await;
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
}

#[rstest]
#[actix_web::test]
async fn reset_clears_users_and_rewinds_ids(repository: Arc<InMemoryUserRepository>) {
    let app = app_over(repository.clone()).await;
    create(&app, valid_user(json!({}))).await;
    create(&app, valid_user(json!({}))).await;

    repository.reset().await.expect("reset");

    let (_, list) = send(&app, actix_test::TestRequest::get().uri("/users")).await;
    assert_eq!(list, json!([]));
    let (_, body) = create(&app, valid_user(json!({}))).await;
    assert_eq!(body["id"], json!(1));
}
