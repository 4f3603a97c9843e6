use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use portier::{EmailSender, Error, JwtConfig, PortierBuilder, error::MailError};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::ServiceExt;

#[derive(Default)]
struct CapturingSender {
    codes: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl EmailSender for CapturingSender {
    async fn send_verification_email(
        &self,
        _to: &str,
        code: &str,
        _user_name: Option<&str>,
    ) -> Result<(), Error> {
        if self.fail {
            return Err(MailError::Delivery("connection refused".to_string()).into());
        }
        self.codes.lock().await.push(code.to_string());
        Ok(())
    }
}

async fn app_with(sender: Arc<CapturingSender>) -> Router {
    let portier = PortierBuilder::new()
        .with_sqlite("sqlite::memory:")
        .await
        .unwrap()
        .with_jwt(JwtConfig::new_hs256(b"routes_test_secret".to_vec()))
        .with_email_sender(sender)
        .apply_migrations(true)
        .build()
        .await
        .unwrap();

    portier_axum::routes(Arc::new(portier))
}

async fn send(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

fn registration(email: &str) -> Value {
    json!({
        "firstname": "Jean",
        "lastname": "Dupont",
        "email": email,
        "password": "Secret123",
        "userPhone": "0612345678",
        "civility": "M",
        "newsletter": false
    })
}

#[tokio::test]
async fn test_account_routes() {
    let sender = Arc::new(CapturingSender::default());
    let app = app_with(sender.clone()).await;

    let (status, body) = send(&app, "POST", "/register", registration("jean@example.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], json!(false));

    let code = sender.codes.lock().await.pop().unwrap();
    let (status, body) = send(
        &app,
        "POST",
        "/verify-email",
        json!({ "email": "jean@example.com", "emailVerificationToken": code }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], json!(false));

    let (status, body) = send(
        &app,
        "POST",
        "/login",
        json!({ "email": "jean@example.com", "password": "Secret123" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["accessToken"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, _) = send(
        &app,
        "PUT",
        "/update",
        json!({ "id": 1, "firstName": "Jeanne" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "PUT", "/update", json!({ "id": "1", "lastName": "Martin" })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_failures() {
    let app = app_with(Arc::new(CapturingSender::default())).await;

    let mut missing_civility = registration("a@example.com");
    missing_civility["civility"] = json!("");
    let (status, body) = send(&app, "POST", "/register", missing_civility).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(true));

    send(&app, "POST", "/register", registration("dup@example.com")).await;
    let (status, body) = send(&app, "POST", "/register", registration("dup@example.com")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(true));

    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_mail_failure() {
    let sender = Arc::new(CapturingSender {
        fail: true,
        ..Default::default()
    });
    let app = app_with(sender).await;

    let (status, body) = send(&app, "POST", "/register", registration("jean@example.com")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!(true));
    assert!(!body["message"].as_str().unwrap().contains("connection refused"));

    // Nothing was stored, so login cannot find the account
    let (status, _) = send(
        &app,
        "POST",
        "/login",
        json!({ "email": "jean@example.com", "password": "Secret123" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_failures_share_one_message() {
    let sender = Arc::new(CapturingSender::default());
    let app = app_with(sender.clone()).await;
    send(&app, "POST", "/register", registration("jean@example.com")).await;
    let code = sender.codes.lock().await.pop().unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let (unknown_status, unknown) = send(
        &app,
        "POST",
        "/verify-email",
        json!({ "email": "ghost@example.com", "emailVerificationToken": "123456" }),
    )
    .await;
    let (mismatch_status, mismatch) = send(
        &app,
        "POST",
        "/verify-email",
        json!({ "email": "jean@example.com", "emailVerificationToken": wrong }),
    )
    .await;

    assert_eq!(unknown_status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(mismatch_status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(unknown["message"], mismatch["message"]);
}

#[tokio::test]
async fn test_login_failures() {
    let app = app_with(Arc::new(CapturingSender::default())).await;
    send(&app, "POST", "/register", registration("jean@example.com")).await;

    let (status, _) = send(&app, "POST", "/login", json!({ "email": "jean@example.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (wrong_status, wrong) = send(
        &app,
        "POST",
        "/login",
        json!({ "email": "jean@example.com", "password": "Wrong1234" }),
    )
    .await;
    let (unknown_status, unknown) = send(
        &app,
        "POST",
        "/login",
        json!({ "email": "ghost@example.com", "password": "Secret123" }),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, unknown);
}

#[tokio::test]
async fn test_update_failures() {
    let app = app_with(Arc::new(CapturingSender::default())).await;
    send(&app, "POST", "/register", registration("jean@example.com")).await;

    let (status, _) = send(&app, "PUT", "/update", json!({ "firstName": "Jeanne" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/update", json!({ "id": "abc" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/update", json!({ "id": 1, "firstName": "Jean2" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/update", json!({ "id": 1, "phoneNumber": "123" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "PUT", "/update", json!({ "id": 404 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!(true));
}

#[tokio::test]
async fn test_health() {
    let app = app_with(Arc::new(CapturingSender::default())).await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["status"], json!("healthy"));
}
