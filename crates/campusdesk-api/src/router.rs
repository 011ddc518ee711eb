//! Route definitions for the CampusDesk HTTP API.
//!
//! Dashboard routes are mounted under `/api`; `/health` sits at the root
//! for load balancers. Everything under `/api/admin` passes the admin-area
//! role gate before reaching its handler.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let admin = admin_routes().route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::rbac::admin_area,
    ));

    let api_routes = Router::new()
        .merge(auth_routes())
        .nest("/admin", admin)
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

fn admin_routes() -> Router<AppState> {
    use handlers::admin::{rooms, sessions, stats, timetables, users};

    Router::new()
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/{id}/password", put(users::reset_password))
        // Rooms
        .route("/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route(
            "/rooms/{id}",
            patch(rooms::update_room).delete(rooms::delete_room),
        )
        // Timetables
        .route(
            "/timetables",
            get(timetables::list_slots).post(timetables::create_slot),
        )
        .route("/timetables/check", post(timetables::check_slot))
        .route(
            "/timetables/{id}",
            patch(timetables::update_slot).delete(timetables::delete_slot),
        )
        // Live sessions
        .route(
            "/sessions",
            get(sessions::list_sessions).post(sessions::start_session),
        )
        .route("/sessions/active", get(sessions::list_active))
        .route(
            "/sessions/{id}",
            patch(sessions::update_session).delete(sessions::delete_session),
        )
        .route("/sessions/{id}/end", post(sessions::end_session))
        // Stats
        .route("/stats/overview", get(stats::overview))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
