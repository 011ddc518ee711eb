//! User management CLI commands.
//!
//! These run with the configured store directly and bypass RBAC: whoever can
//! read the configuration already holds the database credentials.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use campusdesk_auth::password::{PasswordHasher, PasswordValidator};
use campusdesk_core::config::AppConfig;
use campusdesk_core::error::{AppError, ErrorKind};
use campusdesk_database::Stores;
use campusdesk_entity::user::{CreateUser, User, UserRole};
use campusdesk_entity::validate;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user (prompts for the password when not given)
    Create {
        /// Login email
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// ADMIN, HOD, FACULTY or STAFF
        #[arg(long, default_value = "ADMIN")]
        role: String,
        /// Department
        #[arg(long)]
        department: Option<String>,
        /// Password; omit to be prompted
        #[arg(long)]
        password: Option<String>,
    },
    /// List all users
    List {
        /// Filter by role
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Set a new password for a user
    ResetPassword {
        /// Login email of the user
        email: String,
        /// Password; omit to be prompted
        #[arg(long)]
        password: Option<String>,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Name
    name: String,
    /// Role
    role: String,
    /// Department
    department: String,
    /// Active
    active: bool,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email.clone(),
            name: u.name.clone(),
            role: u.role.to_string(),
            department: u.department.clone().unwrap_or_default(),
            active: u.active,
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, cli: &Cli) -> Result<(), AppError> {
    let config = cli.load_config()?;
    let stores = Stores::connect(&config.database).await?;
    if stores.pool().is_none() {
        output::print_warning("Using the memory backend; changes are lost when this command exits.");
    }

    let result = run(&args.command, &config, &stores, cli.format).await;
    stores.close().await;
    result
}

async fn run(
    command: &UserCommand,
    config: &AppConfig,
    stores: &Stores,
    format: OutputFormat,
) -> Result<(), AppError> {
    let hasher = PasswordHasher::new();
    let policy = PasswordValidator::new(&config.auth);

    match command {
        UserCommand::Create {
            email,
            name,
            role,
            department,
            password,
        } => {
            let email = validate::email(email)?;
            let name = validate::required("name", name)?;
            let role: UserRole = role.parse()?;
            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password()?,
            };
            policy.validate(&password, &[email.as_str(), name.as_str()])?;

            let user = User::from_create(CreateUser {
                password_hash: hasher.hash_password(&password)?,
                email,
                name,
                role,
                department: department
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(String::from),
            });
            let user = stores.users.create(&user).await?;

            output::print_success(&format!("User '{}' created ({})", user.email, user.role));
            output::print_kv("ID", &user.id.to_string());
        }
        UserCommand::List { role } => {
            let role = role.as_deref().map(str::parse::<UserRole>).transpose()?;
            let users = stores.users.list().await?;

            let rows: Vec<UserRow> = users
                .iter()
                .filter(|u| role.is_none_or(|r| u.role == r))
                .map(UserRow::from)
                .collect();

            output::print_list(&rows, "users", format);
        }
        UserCommand::ResetPassword { email, password } => {
            let email = validate::email(email)?;
            let user = stores
                .users
                .find_by_email(&email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;

            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password()?,
            };
            policy.validate(&password, &[user.email.as_str(), user.name.as_str()])?;
            stores
                .users
                .update_password(user.id, &hasher.hash_password(&password)?)
                .await?;

            output::print_success(&format!("Password for '{}' updated", user.email));
        }
    }

    Ok(())
}

fn prompt_password() -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to read password", e))
}
