//! `HttpIdentityClient` against an in-process fake of the identity admin API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use essence_admin::domain::repository::IdentityPort;
use essence_admin::error::AdminServiceError;
use essence_admin::infra::identity::HttpIdentityClient;

const SERVICE_KEY: &str = "test-service-key";

#[derive(Clone, Default)]
struct Fake {
    users: Arc<Mutex<Vec<(Uuid, String)>>>,
    /// Requests per listed page number.
    pages_served: Arc<Mutex<Vec<u32>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    apikey == Some(SERVICE_KEY) && bearer == Some(format!("Bearer {SERVICE_KEY}").as_str())
}

#[derive(Deserialize)]
struct CreateBody {
    email: String,
    password: String,
    email_confirm: bool,
}

async fn create(State(fake): State<Fake>, headers: HeaderMap, Json(body): Json<CreateBody>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if body.email == "outage@example.com" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    if body.password.len() < 6 || !body.email_confirm {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error_code": "weak_password", "msg": "Password should be at least 6 characters" })),
        )
            .into_response();
    }
    let mut users = fake.users.lock().unwrap();
    if users.iter().any(|(_, email)| *email == body.email) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "code": 422,
                "error_code": "email_exists",
                "msg": "A user with this email address has already been registered"
            })),
        )
            .into_response();
    }
    let id = Uuid::now_v7();
    users.push((id, body.email.clone()));
    Json(json!({ "id": id, "email": body.email })).into_response()
}

async fn delete(State(fake): State<Fake>, Path(id): Path<Uuid>) -> StatusCode {
    let mut users = fake.users.lock().unwrap();
    let before = users.len();
    users.retain(|(uid, _)| *uid != id);
    if users.len() < before {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn update(State(fake): State<Fake>, Path(id): Path<Uuid>) -> StatusCode {
    if fake.users.lock().unwrap().iter().any(|(uid, _)| *uid == id) {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn list(
    State(fake): State<Fake>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let per_page: usize = params
        .get("per_page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(50);
    fake.pages_served.lock().unwrap().push(page);
    let users = fake.users.lock().unwrap();
    let batch: Vec<_> = users
        .iter()
        .skip((page as usize - 1) * per_page)
        .take(per_page)
        .map(|(id, email)| json!({ "id": id, "email": email }))
        .collect();
    Json(json!({ "users": batch })).into_response()
}

async fn spawn_fake(fake: Fake) -> HttpIdentityClient {
    let app = Router::new()
        .route("/auth/v1/admin/users", get(list).post(create))
        .route("/auth/v1/admin/users/{id}", put(update).delete(delete))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    HttpIdentityClient::new(&format!("http://{addr}/"), SERVICE_KEY)
}

#[tokio::test]
async fn should_create_and_delete_identity() {
    let fake = Fake::default();
    let client = spawn_fake(fake.clone()).await;

    let id = client
        .create_identity("ada@example.com", "s3cret-pass", true)
        .await
        .unwrap();
    assert_eq!(fake.users.lock().unwrap()[0].0, id);

    client.delete_identity(id).await.unwrap();
    assert!(fake.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_map_already_registered_to_identity_conflict() {
    let client = spawn_fake(Fake::default()).await;
    client
        .create_identity("ada@example.com", "s3cret-pass", true)
        .await
        .unwrap();

    let result = client
        .create_identity("ada@example.com", "another-pass", true)
        .await;

    assert!(
        matches!(result, Err(AdminServiceError::IdentityConflict)),
        "expected IdentityConflict, got {result:?}"
    );
}

#[tokio::test]
async fn should_map_other_failures_to_identity_service_error() {
    let client = spawn_fake(Fake::default()).await;

    let outage = client
        .create_identity("outage@example.com", "s3cret-pass", true)
        .await;
    assert!(
        matches!(outage, Err(AdminServiceError::IdentityServiceError(_))),
        "expected IdentityServiceError, got {outage:?}"
    );

    let weak = client.create_identity("bob@example.com", "123", true).await;
    assert!(
        matches!(weak, Err(AdminServiceError::IdentityServiceError(_))),
        "expected IdentityServiceError, got {weak:?}"
    );
}

#[tokio::test]
async fn should_map_unknown_identity_to_user_not_found() {
    let client = spawn_fake(Fake::default()).await;

    let deleted = client.delete_identity(Uuid::now_v7()).await;
    assert!(matches!(deleted, Err(AdminServiceError::UserNotFound)));

    let updated = client.update_password(Uuid::now_v7(), "s3cret-pass").await;
    assert!(matches!(updated, Err(AdminServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_fail_with_identity_service_error_when_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HttpIdentityClient::new(&format!("http://{addr}"), SERVICE_KEY);

    let result = client.delete_identity(Uuid::now_v7()).await;

    assert!(
        matches!(result, Err(AdminServiceError::IdentityServiceError(_))),
        "expected IdentityServiceError, got {result:?}"
    );
}

#[tokio::test]
async fn should_page_through_identities_until_short_page() {
    let fake = Fake::default();
    {
        let mut users = fake.users.lock().unwrap();
        for i in 0..501 {
            users.push((Uuid::now_v7(), format!("user{i}@example.com")));
        }
    }
    let client = spawn_fake(fake.clone()).await;

    let identities = client.list_identities().await.unwrap();

    assert_eq!(identities.len(), 501);
    assert_eq!(identities[0].email.as_deref(), Some("user0@example.com"));
    assert_eq!(fake.pages_served.lock().unwrap().as_slice(), &[1, 2]);
}
