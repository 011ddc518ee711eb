//! Database migration management commands.

use clap::{Args, Subcommand};

use campusdesk_core::config::StoreBackend;
use campusdesk_core::error::AppError;
use campusdesk_database::DatabasePool;
use campusdesk_database::migration::{applied_migrations, run_migrations};

use super::Cli;
use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show applied migrations
    Status,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, cli: &Cli) -> Result<(), AppError> {
    let config = cli.load_config()?;
    if config.database.backend == StoreBackend::Memory {
        output::print_warning("The memory backend has no schema; nothing to migrate.");
        return Ok(());
    }

    let db = DatabasePool::connect(&config.database).await?;

    let result = match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            run_migrations(db.pool()).await.map(|()| {
                output::print_success("All migrations applied successfully.");
            })
        }
        MigrateCommand::Status => applied_migrations(db.pool()).await.map(|applied| {
            if applied.is_empty() {
                println!("No migrations applied.");
            }
            for entry in &applied {
                let state = if entry.success { "applied" } else { "FAILED" };
                println!("  {} - {} ({})", entry.version, entry.description, state);
            }
        }),
    };

    db.close().await;
    result
}
