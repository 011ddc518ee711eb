//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use campusdesk_core::config::{AppConfig, StoreBackend};
use campusdesk_core::error::AppError;

use super::Cli;
use crate::output;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Check that the configuration loads and validates
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, cli: &Cli) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = cli.load_config()?;
            println!("Environment: {}", cli.env_name());
            show(&config);
        }
        ConfigCommand::Validate => match cli.load_config() {
            Ok(_) => {
                output::print_success(&format!(
                    "Configuration in '{}' ({}) is valid",
                    cli.config,
                    cli.env_name()
                ));
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}

fn show(config: &AppConfig) {
    println!("[server]");
    output::print_kv("address", &config.server.bind_address());
    output::print_kv("max_body_bytes", &config.server.max_body_bytes.to_string());
    output::print_kv("cors origins", &config.server.cors.allowed_origins.join(", "));

    println!("[database]");
    match config.database.backend {
        StoreBackend::Memory => output::print_kv("backend", "memory"),
        StoreBackend::Postgres => {
            output::print_kv("backend", "postgres");
            output::print_kv("url", &config.database.display_url());
            output::print_kv(
                "connections",
                &format!(
                    "{}..{}",
                    config.database.min_connections, config.database.max_connections
                ),
            );
            output::print_kv("run_migrations", &config.database.run_migrations.to_string());
        }
    }

    println!("[auth]");
    output::print_kv("jwt_secret", &mask_secret(&config.auth.jwt_secret));
    output::print_kv("token_ttl_hours", &config.auth.token_ttl_hours.to_string());
    output::print_kv(
        "password policy",
        &format!(
            "min length {}, min score {}",
            config.auth.password_min_length, config.auth.password_min_score
        ),
    );
    match &config.auth.bootstrap_admin {
        Some(admin) => output::print_kv("bootstrap_admin", &admin.email),
        None => output::print_kv("bootstrap_admin", "(none)"),
    }

    println!("[logging]");
    output::print_kv("level", &config.logging.level);
    output::print_kv("format", &config.logging.format);
}

/// Keep only enough of a secret to tell two apart.
fn mask_secret(secret: &str) -> String {
    let chars = secret.chars().count();
    if chars <= 8 {
        return "****".to_string();
    }
    let head: String = secret.chars().take(4).collect();
    format!("{head}**** ({chars} chars)")
}
