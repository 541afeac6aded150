//! Integration tests for the users client and hooks.

use std::sync::Arc;

use serde_json::json;
use tokio::net::TcpListener;
use user_directory_client::{ClientError, UseUserMutation, UseUsers, UserApi, UsersClient};
use user_directory_common::{ListUsersParams, NewUser, UserPatch};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(id: i64, name: &str, email: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "role": "User",
        "createdAt": "2024-01-15T08:00:00Z",
        "updatedAt": "2024-01-15T08:00:00Z"
    })
}

/// Serve the real backend router on an ephemeral port.
async fn spawn_backend() -> String {
    let state = user_directory_backend::test_util::create_test_state();
    let app = user_directory_backend::app(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_list_sends_only_non_empty_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("page", "2"))
        .and(query_param("role", "Admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [user_json(3, "Cy", "cy@x.com")],
            "pagination": {"page": 2, "limit": 10, "total": 11, "totalPages": 2}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UsersClient::new(&mock_server.uri());
    let params = ListUsersParams::default().page(2).search("").role("Admin");
    let page = client.list_users(&params).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.pagination.total_pages, 2);

    let requests = mock_server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("search"));
}

#[tokio::test]
async fn test_error_envelope_message_is_used() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({"name": "C", "email": "a@x.com", "role": "User"})))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "error": "Email already exists"
        })))
        .mount(&mock_server)
        .await;

    let client = UsersClient::new(&mock_server.uri());
    let err = client
        .create_user(&NewUser::new("C", "a@x.com", "User"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 409, .. }));
    assert_eq!(err.to_string(), "Email already exists");
}

#[tokio::test]
async fn test_non_json_error_falls_back_to_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let client = UsersClient::new(&mock_server.uri());
    let err = client.get_user(1).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.to_string(), "HTTP error! status: 502");
}

#[tokio::test]
async fn test_success_without_data_is_invalid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&mock_server)
        .await;

    let client = UsersClient::new(&mock_server.uri());
    let err = client.delete_user(4).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_mutation_hook_captures_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/users/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": "User not found"
        })))
        .mount(&mock_server)
        .await;

    let hook = UseUserMutation::new(Arc::new(UsersClient::new(&mock_server.uri())));
    let patch = UserPatch {
        name: Some("Nobody".to_string()),
        ..Default::default()
    };
    assert!(hook.update(9, patch).await.is_none());
    let state = hook.state().await;
    assert_eq!(state.error.as_deref(), Some("User not found"));
    assert!(!state.loading);
}

#[tokio::test]
async fn test_end_to_end_against_backend() {
    let base_url = spawn_backend().await;
    let api: Arc<dyn UserApi> = Arc::new(UsersClient::new(&base_url));

    let list = UseUsers::new(api.clone(), ListUsersParams::default().limit(2));
    list.mount().await;
    let state = list.state().await;
    assert!(state.error.is_none());
    assert_eq!(state.data.users.len(), 2);
    assert_eq!(state.data.pagination.total, 4);
    assert_eq!(state.data.pagination.total_pages, 2);

    let mutation = UseUserMutation::new(api.clone());
    let created = mutation
        .create(NewUser::new("Quinn", "quinn@x.com", "Moderator"))
        .await
        .unwrap();
    assert_eq!(created.id, 5);

    let duplicate = mutation
        .create(NewUser::new("Quinn", "quinn@x.com", "Moderator"))
        .await;
    assert!(duplicate.is_none());
    assert_eq!(
        mutation.state().await.error.as_deref(),
        Some("Email already exists")
    );

    list.set_params(ListUsersParams::default().search("quinn")).await;
    let state = list.state().await;
    assert_eq!(state.data.users, vec![created.clone()]);

    let deleted = mutation.delete(created.id).await.unwrap();
    assert_eq!(deleted.id, created.id);
    let err = api.get_user(created.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_list_failure_envelope_keeps_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Database offline"
        })))
        .mount(&mock_server)
        .await;

    let client = UsersClient::new(&mock_server.uri());
    let err = client
        .list_users(&ListUsersParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 200, .. }));
    assert_eq!(err.to_string(), "Database offline");

    let hook = UseUsers::new(Arc::new(client), ListUsersParams::default());
    hook.mount().await;
    assert_eq!(hook.state().await.error.as_deref(), Some("Database offline"));
}

#[tokio::test]
async fn test_list_failure_without_message_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&mock_server)
        .await;

    let client = UsersClient::new(&mock_server.uri());
    let err = client
        .list_users(&ListUsersParams::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to load users");
}
