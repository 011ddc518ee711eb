//! Admin user management — CRUD, password resets and the bootstrap account.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use campusdesk_auth::password::{PasswordHasher, PasswordValidator};
use campusdesk_auth::rbac::{Permission, RbacEnforcer};
use campusdesk_core::config::BootstrapAdminConfig;
use campusdesk_core::error::AppError;
use campusdesk_database::UserStore;
use campusdesk_entity::user::{CreateUser, UpdateUser, User, UserProfile, UserRole};
use campusdesk_entity::validate;

use crate::context::RequestContext;

/// Raw input for a new account.
#[derive(Debug, Clone)]
pub struct NewUserInput {
    /// Login email.
    pub email: String,
    /// Initial password (plaintext).
    pub password: String,
    /// Name.
    pub name: String,
    /// Role assignment.
    pub role: UserRole,
    /// Department.
    pub department: Option<String>,
}

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            rbac,
        }
    }

    /// Lists all users.
    pub async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<UserProfile>, AppError> {
        self.rbac.require_permission(ctx.role, Permission::UserRead)?;

        let users = self.users.list().await?;
        Ok(users.iter().map(User::profile).collect())
    }

    /// Gets a single user by ID.
    pub async fn get_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<UserProfile, AppError> {
        self.rbac.require_permission(ctx.role, Permission::UserRead)?;
        Ok(self.find(user_id).await?.profile())
    }

    /// Creates a new user.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        input: NewUserInput,
    ) -> Result<UserProfile, AppError> {
        self.rbac.require_permission(ctx.role, Permission::UserManage)?;

        let user = self.insert(input).await?;

        info!(
            admin_id = %ctx.user_id,
            new_user_id = %user.id,
            email = %user.email,
            role = %user.role,
            "User created by admin"
        );

        Ok(user.profile())
    }

    /// Updates a user's profile fields. Passwords are changed through
    /// [`Self::reset_password`] only.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        patch: UpdateUser,
    ) -> Result<UserProfile, AppError> {
        self.rbac.require_permission(ctx.role, Permission::UserManage)?;

        if user_id == ctx.user_id {
            if patch.role.is_some_and(|role| role != ctx.role) {
                return Err(AppError::forbidden("Cannot change your own role"));
            }
            if patch.active == Some(false) {
                return Err(AppError::forbidden("Cannot deactivate your own account"));
            }
        }

        let mut user = self.find(user_id).await?;
        patch.apply(&mut user)?;
        let user = self.users.update(&user).await?;

        info!(admin_id = %ctx.user_id, target_id = %user_id, "User updated by admin");

        Ok(user.profile())
    }

    /// Resets a user's password (admin). Nothing else about the user changes.
    pub async fn reset_password(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        new_password: &str,
    ) -> Result<(), AppError> {
        self.rbac
            .require_permission(ctx.role, Permission::UserResetPassword)?;

        let user = self.find(user_id).await?;
        self.validator
            .validate(new_password, &[user.email.as_str(), user.name.as_str()])?;
        let hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(user_id, &hash).await?;

        info!(
            admin_id = %ctx.user_id,
            target_id = %user_id,
            "Password reset by admin"
        );

        Ok(())
    }

    /// Deletes a user.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<(), AppError> {
        self.rbac.require_permission(ctx.role, Permission::UserManage)?;

        if user_id == ctx.user_id {
            return Err(AppError::forbidden("Cannot delete your own account"));
        }

        if !self.users.delete(user_id).await? {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }

        info!(
            admin_id = %ctx.user_id,
            target_id = %user_id,
            "User deleted"
        );

        Ok(())
    }

    /// Create the configured administrator when no account exists yet.
    ///
    /// Returns the new account, or `None` when users already exist.
    pub async fn ensure_bootstrap_admin(
        &self,
        config: &BootstrapAdminConfig,
    ) -> Result<Option<UserProfile>, AppError> {
        if self.users.count().await? > 0 {
            return Ok(None);
        }

        let user = self
            .insert(NewUserInput {
                email: config.email.clone(),
                password: config.password.clone(),
                name: config.name.clone(),
                role: UserRole::Admin,
                department: None,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "Bootstrap administrator created");
        Ok(Some(user.profile()))
    }

    async fn find(&self, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    async fn insert(&self, input: NewUserInput) -> Result<User, AppError> {
        let email = validate::email(&input.email)?;
        let name = validate::required("name", &input.name)?;
        let department = input
            .department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        self.validator
            .validate(&input.password, &[email.as_str(), name.as_str()])?;
        let password_hash = self.hasher.hash_password(&input.password)?;

        let user = User::from_create(CreateUser {
            email,
            password_hash,
            name,
            role: input.role,
            department,
        });
        self.users.create(&user).await
    }
}
