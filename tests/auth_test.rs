//! Integration tests for the authentication flow.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use helpers::{ADMIN_EMAIL, FACULTY_EMAIL, TestApp};

#[tokio::test]
async fn test_login_returns_token_for_stored_user() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": helpers::PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["token"].is_string());
    assert_eq!(response.body["user"]["id"], app.admin.id.to_string());
    assert_eq!(response.body["user"]["role"], "ADMIN");
    assert!(response.body["user"].get("passwordHash").is_none());

    // The token's subject is the stored user: /me resolves back to them
    let token = response.body["token"].as_str().unwrap();
    let me = app.request("GET", "/api/auth/me", None, Some(token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["id"], app.admin.id.to_string());
    assert_eq!(me.body["user"]["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "  Admin@Campus.EDU ", "password": helpers::PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_the_same() {
    let app = TestApp::new().await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": "not-the-password" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@campus.edu", "password": helpers::PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
    assert_eq!(wrong.body["error"], "INVALID_CREDENTIALS");
    assert!(wrong.body.get("token").is_none());
}

#[tokio::test]
async fn test_blank_credentials_are_a_validation_error() {
    let app = TestApp::new().await;
    let response = app
        .request("POST", "/api/auth/login", Some(json!({ "email": ADMIN_EMAIL })), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = TestApp::new().await;
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_me_requires_a_bearer_token() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["message"], "Missing Authorization header");

    let request = axum::http::Request::builder()
        .uri("/api/auth/me")
        .header("authorization", "Basic YWRtaW46cGFzcw==")
        .body(axum::body::Body::empty())
        .unwrap();
    let basic = app.send(request).await;
    assert_eq!(basic.status, StatusCode::UNAUTHORIZED);

    let garbage = app.request("GET", "/api/auth/me", None, Some("not.a.jwt")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_older_than_a_day_is_rejected() {
    let app = TestApp::new().await;

    let stale = app.token_issued_at(&app.admin, Utc::now() - Duration::hours(24) - Duration::seconds(5));
    let response = app.request("GET", "/api/auth/me", None, Some(&stale)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let fresh = app.token_issued_at(&app.admin, Utc::now() - Duration::hours(23));
    let response = app.request("GET", "/api/auth/me", None, Some(&fresh)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_token_signed_with_another_secret_is_rejected() {
    let app = TestApp::new().await;
    let mut other = app.config.auth.clone();
    other.jwt_secret = "some-other-secret".to_string();
    let forged = campusdesk_auth::JwtEncoder::new(&other)
        .issue(&app.admin)
        .unwrap()
        .token;

    let response = app.request("GET", "/api/auth/me", None, Some(&forged)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_area_is_gated_by_role() {
    let app = TestApp::new().await;

    let anonymous = app.request("GET", "/api/admin/rooms", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let faculty = app.login(FACULTY_EMAIL).await;
    let response = app.request("GET", "/api/admin/rooms", None, Some(&faculty)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let admin = app.admin_token().await;
    let response = app.request("GET", "/api/admin/rooms", None, Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_hod_reads_but_cannot_write() {
    let app = TestApp::new().await;
    let hod = app.login(helpers::HOD_EMAIL).await;

    let list = app.request("GET", "/api/admin/timetables", None, Some(&hod)).await;
    assert_eq!(list.status, StatusCode::OK);

    let stats = app.request("GET", "/api/admin/stats/overview", None, Some(&hod)).await;
    assert_eq!(stats.status, StatusCode::OK);

    let create = app
        .request(
            "POST",
            "/api/admin/rooms",
            Some(json!({ "name": "Lab 9", "code": "L9", "capacity": 10 })),
            Some(&hod),
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);

    let users = app.request("GET", "/api/admin/users", None, Some(&hod)).await;
    assert_eq!(users.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
