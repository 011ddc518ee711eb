//! Integration tests for admin user management.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

const NEW_PASSWORD: &str = "Amber-Quarry-51-Falcon";

#[tokio::test]
async fn test_create_and_list_users() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = app
        .request(
            "POST",
            "/api/admin/users",
            Some(json!({
                "email": "Staff@Campus.edu",
                "password": NEW_PASSWORD,
                "name": "Sam Staff",
                "role": "STAFF",
                "department": "Library",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(created.body["email"], "staff@campus.edu");
    assert_eq!(created.body["role"], "STAFF");
    assert!(created.body.get("passwordHash").is_none());

    let list = app.request("GET", "/api/admin/users", None, Some(&token)).await;
    assert_eq!(list.body.as_array().unwrap().len(), 4);

    // The new account can sign in
    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "staff@campus.edu", "password": NEW_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(json!({
                "email": helpers::HOD_EMAIL,
                "password": NEW_PASSWORD,
                "name": "Someone",
                "role": "HOD",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_weak_password_is_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(json!({
                "email": "weak@campus.edu",
                "password": "password",
                "name": "Weak",
                "role": "STAFF",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_refuses_password_field() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/users/{}", app.faculty.id),
            Some(json!({ "password": NEW_PASSWORD })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_applies_the_same_email_rule_as_create() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let path = format!("/api/admin/users/{}", app.hod.id);

    let created = app
        .request(
            "POST",
            "/api/admin/users",
            Some(json!({
                "email": "bad email@x.y",
                "password": NEW_PASSWORD,
                "name": "Bad",
                "role": "STAFF",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::BAD_REQUEST);

    let updated = app
        .request("PATCH", &path, Some(json!({ "email": "bad email@x.y" })), Some(&token))
        .await;
    assert_eq!(updated.status, StatusCode::BAD_REQUEST, "{:?}", updated.body);
    assert_eq!(updated.body["error"], "VALIDATION_ERROR");

    let stored = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(stored.body["email"], helpers::HOD_EMAIL);
}

#[tokio::test]
async fn test_reset_password_changes_only_the_password() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{}/password", app.faculty.id),
            Some(json!({ "password": NEW_PASSWORD })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let old = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": helpers::FACULTY_EMAIL, "password": helpers::PASSWORD })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": helpers::FACULTY_EMAIL, "password": NEW_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(new.status, StatusCode::OK);
    assert_eq!(new.body["user"]["name"], "Fay Faculty");
    assert_eq!(new.body["user"]["role"], "FACULTY");
}

#[tokio::test]
async fn test_admin_cannot_delete_or_demote_self() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let me = format!("/api/admin/users/{}", app.admin.id);

    let delete = app.request("DELETE", &me, None, Some(&token)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let demote = app
        .request("PATCH", &me, Some(json!({ "role": "STAFF" })), Some(&token))
        .await;
    assert_eq!(demote.status, StatusCode::FORBIDDEN);

    let rename = app
        .request("PATCH", &me, Some(json!({ "name": "Ada A." })), Some(&token))
        .await;
    assert_eq!(rename.status, StatusCode::OK);
    assert_eq!(rename.body["name"], "Ada A.");
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let path = format!("/api/admin/users/{}", app.faculty.id);

    let deleted = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let fetched = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);

    assert!(app.stores.users.find_by_id(app.faculty.id).await.unwrap().is_none());
}
