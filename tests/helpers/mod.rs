//! Shared test helpers for integration tests.
//!
//! Every `TestApp` runs the full router over a fresh in-memory store seeded
//! with one user per role.

#![allow(dead_code)]

use std::sync::OnceLock;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use campusdesk_api::{AppState, build_app};
use campusdesk_auth::{JwtEncoder, PasswordHasher};
use campusdesk_core::config::{AppConfig, StoreBackend};
use campusdesk_database::Stores;
use campusdesk_entity::user::{CreateUser, User, UserRole};

/// Password shared by every seeded user.
pub const PASSWORD: &str = "Violet-Harbor-93-Lantern";

pub const ADMIN_EMAIL: &str = "admin@campus.edu";
pub const HOD_EMAIL: &str = "hod@campus.edu";
pub const FACULTY_EMAIL: &str = "faculty@campus.edu";

/// Hashing is slow in debug builds; do it once per test binary.
fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| {
        PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("hash test password")
    })
}

/// Response captured from the router.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Stores behind the router, for direct assertions
    pub stores: Stores,
    /// Application config
    pub config: AppConfig,
    /// Seeded admin
    pub admin: User,
    /// Seeded head of department
    pub hod: User,
    /// Seeded faculty member
    pub faculty: User,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let stores = Stores::memory();
        let admin = seed(&stores, ADMIN_EMAIL, "Ada Admin", UserRole::Admin).await;
        let hod = seed(&stores, HOD_EMAIL, "Hari Head", UserRole::Hod).await;
        let faculty = seed(&stores, FACULTY_EMAIL, "Fay Faculty", UserRole::Faculty).await;

        let router = build_app(AppState::new(config.clone(), stores.clone()));

        Self {
            router,
            stores,
            config,
            admin,
            hod,
            faculty,
        }
    }

    /// Send a request through the router
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        self.send(request).await
    }

    /// Send a prebuilt request through the router
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };

        TestResponse { status, body }
    }

    /// Log in through the API and return the bearer token
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        response.body["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Token for the seeded admin
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL).await
    }

    /// Sign a token for `user` as if issued at `issued_at`
    pub fn token_issued_at(&self, user: &User, issued_at: DateTime<Utc>) -> String {
        JwtEncoder::new(&self.config.auth)
            .issue_at(user, issued_at)
            .expect("sign token")
            .token
    }
}

async fn seed(stores: &Stores, email: &str, name: &str, role: UserRole) -> User {
    let user = User::from_create(CreateUser {
        email: email.to_string(),
        password_hash: password_hash().to_string(),
        name: name.to_string(),
        role,
        department: Some("Computer Science".to_string()),
    });
    stores.users.create(&user).await.expect("seed user")
}
