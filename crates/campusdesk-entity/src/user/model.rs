//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use campusdesk_core::error::AppError;

use super::role::UserRole;
use crate::validate;

/// A staff account able to sign in to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email, stored lowercase and unique.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable name.
    pub name: String,
    /// Role used for access control.
    pub role: UserRole,
    /// Department the user belongs to.
    pub department: Option<String>,
    /// Disabled accounts are kept but flagged.
    pub active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh row from creation data.
    pub fn from_create(data: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: data.email,
            password_hash: data.password_hash,
            name: data.name,
            role: data.role,
            department: data.department,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The public projection of this user.
    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

/// The fields of a user that may leave the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Name.
    pub name: String,
    /// Role.
    pub role: UserRole,
    /// Department.
    pub department: Option<String>,
    /// Whether the account is enabled.
    pub active: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            department: user.department.clone(),
            active: user.active,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Normalized email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Name.
    pub name: String,
    /// Assigned role.
    pub role: UserRole,
    /// Department.
    pub department: Option<String>,
}

/// Partial update of a user's profile. Passwords are deliberately absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New department; an empty string clears it.
    pub department: Option<String>,
    /// Enable or disable the account.
    pub active: Option<bool>,
}

impl UpdateUser {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.department.is_none()
            && self.active.is_none()
    }

    /// Validate the patch and merge it into `user`.
    pub fn apply(self, user: &mut User) -> Result<(), AppError> {
        if let Some(name) = validate::optional("name", self.name.as_deref())? {
            user.name = name;
        }
        if let Some(email) = self.email.as_deref() {
            user.email = validate::email(email)?;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(department) = self.department {
            let department = department.trim();
            user.department = (!department.is_empty()).then(|| department.to_string());
        }
        if let Some(active) = self.active {
            user.active = active;
        }
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User::from_create(CreateUser {
            email: "hod@campus.edu".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            name: "Head".to_string(),
            role: UserRole::Hod,
            department: Some("Physics".to_string()),
        })
    }

    #[test]
    fn test_profile_never_serializes_hash() {
        let user = sample();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["role"], "HOD");
    }

    #[test]
    fn test_update_clears_department_with_empty_string() {
        let mut user = sample();
        UpdateUser {
            department: Some("  ".to_string()),
            ..UpdateUser::default()
        }
        .apply(&mut user)
        .unwrap();
        assert_eq!(user.department, None);
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let mut user = sample();
        let patch = UpdateUser {
            name: Some(String::new()),
            ..UpdateUser::default()
        };
        assert!(patch.apply(&mut user).is_err());
        assert_eq!(user.name, "Head");
    }
}
