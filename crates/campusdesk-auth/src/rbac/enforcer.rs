//! RBAC enforcement logic — checks whether a role may perform an operation.

use tracing::warn;

use campusdesk_core::error::AppError;
use campusdesk_entity::user::UserRole;

use super::policies::{Permission, RbacPolicies};

/// Enforces role-based access control.
#[derive(Debug, Clone)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Checks whether the given role has the required permission.
    ///
    /// Returns `Ok(())` if allowed, or a `Forbidden` error if denied.
    pub fn require_permission(&self, role: UserRole, permission: Permission) -> Result<(), AppError> {
        if self.policies.has_permission(role, permission) {
            Ok(())
        } else {
            warn!(role = %role, permission = ?permission, "Permission denied");
            Err(AppError::forbidden(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Checks whether the role is one of `allowed`.
    pub fn require_role(&self, role: UserRole, allowed: &[UserRole]) -> Result<(), AppError> {
        if allowed.contains(&role) {
            Ok(())
        } else {
            warn!(role = %role, "Role outside the allowed set");
            Err(AppError::forbidden(format!(
                "Role '{role}' may not perform this action"
            )))
        }
    }

    /// Checks whether the role has the required permission (returns bool).
    pub fn has_permission(&self, role: UserRole, permission: Permission) -> bool {
        self.policies.has_permission(role, permission)
    }
}

impl Default for RbacEnforcer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_core::ErrorKind;

    #[test]
    fn test_require_role_admin_only() {
        let rbac = RbacEnforcer::new();
        assert!(rbac.require_role(UserRole::Admin, &[UserRole::Admin]).is_ok());
        for role in [UserRole::Hod, UserRole::Faculty, UserRole::Staff] {
            let err = rbac.require_role(role, &[UserRole::Admin]).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Forbidden);
        }
    }

    #[test]
    fn test_admin_holds_every_permission() {
        let rbac = RbacEnforcer::new();
        for permission in Permission::ALL {
            assert!(rbac.require_permission(UserRole::Admin, permission).is_ok());
        }
    }

    #[test]
    fn test_hod_is_read_only() {
        let rbac = RbacEnforcer::new();
        assert!(rbac.has_permission(UserRole::Hod, Permission::RoomRead));
        assert!(rbac.has_permission(UserRole::Hod, Permission::StatsView));
        assert!(!rbac.has_permission(UserRole::Hod, Permission::RoomManage));
        assert!(!rbac.has_permission(UserRole::Hod, Permission::UserRead));
    }

    #[test]
    fn test_faculty_and_staff_hold_nothing() {
        let rbac = RbacEnforcer::new();
        for permission in Permission::ALL {
            assert!(!rbac.has_permission(UserRole::Faculty, permission));
            assert!(!rbac.has_permission(UserRole::Staff, permission));
        }
    }

    #[test]
    fn test_custom_policy() {
        let rbac = RbacEnforcer::with_policies(
            RbacPolicies::new().with_role(UserRole::Faculty, [Permission::TimetableRead]),
        );
        assert!(rbac.has_permission(UserRole::Faculty, Permission::TimetableRead));
    }
}
