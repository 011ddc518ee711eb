//! Integration tests for room management.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_created_room_is_listed() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = app
        .request(
            "POST",
            "/api/admin/rooms",
            Some(json!({ "name": "Lab 1", "code": "L1", "capacity": 30, "status": "AVAILABLE" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let list = app.request("GET", "/api/admin/rooms", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    let rooms = list.body.as_array().expect("bare array");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["name"], "Lab 1");
    assert_eq!(rooms[0]["code"], "L1");
    assert_eq!(rooms[0]["capacity"], 30);
    assert_eq!(rooms[0]["status"], "AVAILABLE");
    assert_eq!(rooms[0]["id"], created.body["id"]);
}

#[tokio::test]
async fn test_capacity_is_coerced() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let garbage = app
        .request(
            "POST",
            "/api/admin/rooms",
            Some(json!({ "name": "Hall", "code": "H1", "capacity": "abc" })),
            Some(&token),
        )
        .await;
    assert_eq!(garbage.status, StatusCode::CREATED);
    assert_eq!(garbage.body["capacity"], 0);

    let numeric = app
        .request(
            "POST",
            "/api/admin/rooms",
            Some(json!({ "name": "Annex", "code": "A1", "capacity": "45" })),
            Some(&token),
        )
        .await;
    assert_eq!(numeric.body["capacity"], 45);
}

#[tokio::test]
async fn test_room_validation() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let blank = app
        .request("POST", "/api/admin/rooms", Some(json!({ "name": "  ", "code": "X" })), Some(&token))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let status = app
        .request(
            "POST",
            "/api/admin/rooms",
            Some(json!({ "name": "Lab", "code": "X", "status": "CLOSED" })),
            Some(&token),
        )
        .await;
    assert_eq!(status.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_code_conflicts() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let body = json!({ "name": "Lab 1", "code": "L1", "capacity": 30 });

    let first = app.request("POST", "/api/admin/rooms", Some(body.clone()), Some(&token)).await;
    assert_eq!(first.status, StatusCode::CREATED);
    let second = app.request("POST", "/api/admin/rooms", Some(body), Some(&token)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_and_delete_room() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = app
        .request(
            "POST",
            "/api/admin/rooms",
            Some(json!({ "name": "Lab 1", "code": "L1", "capacity": 30 })),
            Some(&token),
        )
        .await;
    let id = created.body["id"].as_str().unwrap().to_string();

    let updated = app
        .request(
            "PATCH",
            &format!("/api/admin/rooms/{id}"),
            Some(json!({ "status": "MAINTENANCE" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["status"], "MAINTENANCE");
    assert_eq!(updated.body["capacity"], 30);

    let deleted = app
        .request("DELETE", &format!("/api/admin/rooms/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let again = app
        .request("DELETE", &format!("/api/admin/rooms/{id}"), None, Some(&token))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let missing = app
        .request(
            "PATCH",
            &format!("/api/admin/rooms/{id}"),
            Some(json!({ "name": "Gone" })),
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let response = app
        .request("DELETE", "/api/admin/rooms/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
