//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available to staff accounts.
///
/// The set is closed: what each role may do is decided by the RBAC policy
/// table in `campusdesk-auth`, never by ad hoc string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Full dashboard administrator.
    Admin,
    /// Head of department.
    Hod,
    /// Teaching staff.
    Faculty,
    /// Non-teaching staff.
    Staff,
}

impl UserRole {
    /// Every role, in descending order of seniority.
    pub const ALL: [UserRole; 4] = [Self::Admin, Self::Hod, Self::Faculty, Self::Staff];

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as its uppercase wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Hod => "HOD",
            Self::Faculty => "FACULTY",
            Self::Staff => "STAFF",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = campusdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "HOD" => Ok(Self::Hod),
            "FACULTY" => Ok(Self::Faculty),
            "STAFF" => Ok(Self::Staff),
            _ => Err(campusdesk_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: ADMIN, HOD, FACULTY, STAFF"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("HOD".parse::<UserRole>().unwrap(), UserRole::Hod);
        assert!("manager".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serde_uses_uppercase() {
        let json = serde_json::to_string(&UserRole::Faculty).unwrap();
        assert_eq!(json, "\"FACULTY\"");
        let parsed: UserRole = serde_json::from_str("\"STAFF\"").unwrap();
        assert_eq!(parsed, UserRole::Staff);
    }
}
