//! HTTP client tests against a local mock server
//!
//! Pins the wire contract: JSON bodies, bearer auth on task endpoints,
//! `error`-field extraction on failures, and the fixed per-call timeout.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use libtaskmarket::api::{Api, Credentials, HttpApi};
use libtaskmarket::{ApiError, MarketError};

const TOKEN: &str = "secret-token";

async fn client(server: &MockServer) -> HttpApi {
    HttpApi::new(server.uri()).expect("failed to build client")
}

#[tokio::test]
async fn login_posts_credentials_and_parses_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({
            "email": "yael1@mail.com",
            "password": "password0"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Login successful",
            "token": "secret-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server).await;
    let response = api
        .login(&Credentials::new("yael1@mail.com", "password0"))
        .await
        .expect("login failed");

    assert!(response.success);
    assert_eq!(response.message, "Login successful");
    assert_eq!(response.token.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn login_rejection_comes_back_as_domain_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let api = client(&server).await;
    let response = api
        .login(&Credentials::new("yael1@mail.com", "wrong"))
        .await
        .expect("transport should succeed");

    assert!(!response.success);
    assert_eq!(response.message, "Invalid credentials");
    assert_eq!(response.token, None);
}

#[tokio::test]
async fn non_2xx_surfaces_the_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Unknown account"})),
        )
        .mount(&server)
        .await;

    let api = client(&server).await;
    let result = api.login(&Credentials::new("a@b.c", "pw")).await;

    match result {
        Err(MarketError::Api(ApiError::Server(message))) => {
            assert_eq!(message, "Unknown account");
        }
        other => panic!("expected Server error, got {:?}", other),
    }
}

#[tokio::test]
async fn non_2xx_without_parseable_body_gets_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let api = client(&server).await;
    let result = api.list_tasks(TOKEN).await;

    match result {
        Err(MarketError::Api(ApiError::Server(message))) => {
            assert!(message.contains("500"), "message was: {message}");
        }
        other => panic!("expected Server error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_2xx_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = client(&server).await;
    let result = api.list_tasks(TOKEN).await;

    assert!(matches!(
        result,
        Err(MarketError::Api(ApiError::Decode(_)))
    ));
}

#[tokio::test]
async fn list_tasks_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tasks": [
                {"id": 1, "title": "Buy milk", "content": "Two liters"},
                {"id": 2, "title": "Call Ana", "content": "About the flat"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server).await;
    let tasks = api.list_tasks(TOKEN).await.expect("list failed");

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, 1);
    assert_eq!(tasks[1].title, "Call Ana");
}

#[tokio::test]
async fn create_task_unwraps_the_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(body_json(json!({"title": "Buy milk", "content": "Two liters"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "task": {"id": 7, "title": "Buy milk", "content": "Two liters"}
        })))
        .mount(&server)
        .await;

    let api = client(&server).await;
    let task = api
        .create_task(TOKEN, "Buy milk", "Two liters")
        .await
        .expect("create failed");

    assert_eq!(task.id, 7);
    assert_eq!(task.title, "Buy milk");
}

#[tokio::test]
async fn update_task_patches_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasks/7"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server).await;
    api.update_task(TOKEN, 7, "Buy milk", "Three liters")
        .await
        .expect("update failed");
}

#[tokio::test]
async fn unsuccessful_ack_is_a_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let api = client(&server).await;
    let result = api.delete_task(TOKEN, 7).await;

    assert!(matches!(
        result,
        Err(MarketError::Api(ApiError::Rejected(_)))
    ));
}

#[tokio::test]
async fn delete_task_succeeds_on_ack() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/3"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let api = client(&server).await;
    api.delete_task(TOKEN, 3).await.expect("delete failed");
}

#[tokio::test]
async fn slow_responses_hit_the_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"tasks": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let api = HttpApi::with_timeout(server.uri(), Duration::from_millis(50))
        .expect("failed to build client");
    let result = api.list_tasks(TOKEN).await;

    assert!(matches!(
        result,
        Err(MarketError::Api(ApiError::Timeout(_)))
    ));
}
