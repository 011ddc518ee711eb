//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod user;

use clap::{Parser, Subcommand};

use campusdesk_core::config::AppConfig;
use campusdesk_core::error::AppError;

use crate::output::OutputFormat;

/// CampusDesk — campus administration dashboard back-end
#[derive(Debug, Parser)]
#[command(name = "campusdesk", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and the environment overlays
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Environment overlay to apply (falls back to CAMPUSDESK_ENV, then `development`)
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, self).await,
            Commands::User(args) => user::execute(args, self).await,
            Commands::Config(args) => config::execute(args, self),
        }
    }

    /// The selected environment name.
    pub fn env_name(&self) -> String {
        self.env
            .clone()
            .or_else(|| std::env::var("CAMPUSDESK_ENV").ok())
            .unwrap_or_else(|| "development".to_string())
    }

    /// Load and validate configuration for the selected environment.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        let config = AppConfig::load_from_dir(&self.config, &self.env_name())?;
        config.validate()?;
        Ok(config)
    }
}
