//! CampusDesk Server — back-end for the campus administration dashboard.
//!
//! Loads configuration, initializes logging and hands over to the API crate.

use tracing_subscriber::{EnvFilter, fmt};

use campusdesk_core::config::AppConfig;
use campusdesk_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!("Starting CampusDesk v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = campusdesk_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CAMPUSDESK_ENV").unwrap_or_else(|_| "development".to_string());
    let dir = std::env::var("CAMPUSDESK_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    let config = AppConfig::load_from_dir(&dir, &env)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging. `RUST_LOG` overrides the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
