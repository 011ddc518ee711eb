//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use campusdesk_core::config::AppConfig;
use campusdesk_database::Stores;
use campusdesk_service::ServiceContext;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-backed for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Store backend (PostgreSQL or in-memory)
    pub stores: Stores,
    /// Wired business services
    pub services: ServiceContext,
}

impl AppState {
    /// Wire services against `stores`.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let services = ServiceContext::new(&config, &stores);
        Self {
            config: Arc::new(config),
            stores,
            services,
        }
    }
}
