//! Application builder — wires router, middleware and state into an Axum app
//! and runs it.

use axum::Router;

use campusdesk_core::config::AppConfig;
use campusdesk_core::error::AppError;
use campusdesk_database::Stores;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the CampusDesk server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CampusDesk server...");

    // ── Step 1: Connect the store (runs migrations when enabled) ──
    tracing::info!(backend = ?config.database.backend, "Connecting store");
    let stores = Stores::connect(&config.database).await?;

    // ── Step 2: Wire services ────────────────────────────────────
    let addr = config.server.bind_address();
    let state = AppState::new(config, stores.clone());

    // ── Step 3: Bootstrap the first admin ────────────────────────
    if let Some(bootstrap) = &state.config.auth.bootstrap_admin {
        match state.services.users.ensure_bootstrap_admin(bootstrap).await? {
            Some(admin) => tracing::info!(email = %admin.email, "Bootstrap admin created"),
            None => tracing::debug!("Users exist, bootstrap admin skipped"),
        }
    }

    // ── Step 4: Serve ────────────────────────────────────────────
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("CampusDesk server listening on {}", addr);

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")));

    stores.close().await;
    tracing::info!("CampusDesk server stopped");
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
