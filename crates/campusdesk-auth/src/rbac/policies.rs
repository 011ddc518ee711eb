//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use campusdesk_entity::user::UserRole;

/// A dashboard operation that requires authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // Users
    /// List user accounts.
    UserRead,
    /// Create, edit and delete user accounts.
    UserManage,
    /// Set another user's password.
    UserResetPassword,

    // Rooms
    /// List rooms.
    RoomRead,
    /// Create, edit and delete rooms.
    RoomManage,

    // Timetable
    /// List timetable slots and run clash checks.
    TimetableRead,
    /// Create, edit and delete timetable slots.
    TimetableManage,

    // Live sessions
    /// List sessions.
    SessionRead,
    /// Start, edit, end and delete sessions.
    SessionManage,

    /// Read the overview counters.
    StatsView,
}

impl Permission {
    /// Every permission.
    pub const ALL: [Permission; 10] = [
        Self::UserRead,
        Self::UserManage,
        Self::UserResetPassword,
        Self::RoomRead,
        Self::RoomManage,
        Self::TimetableRead,
        Self::TimetableManage,
        Self::SessionRead,
        Self::SessionManage,
        Self::StatsView,
    ];
}

/// Defines the mapping from each role to its set of allowed permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Role → set of permissions.
    policies: HashMap<UserRole, HashSet<Permission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Admin: everything
        policies.insert(UserRole::Admin, Permission::ALL.into_iter().collect());

        // HOD: read-only view of the dashboard
        let hod: HashSet<Permission> = [
            Permission::RoomRead,
            Permission::TimetableRead,
            Permission::SessionRead,
            Permission::StatsView,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::Hod, hod);

        // Faculty and staff sign in but hold no admin permissions.
        policies.insert(UserRole::Faculty, HashSet::new());
        policies.insert(UserRole::Staff, HashSet::new());

        Self { policies }
    }

    /// Replace the permission set of one role.
    pub fn with_role(mut self, role: UserRole, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.policies.insert(role, permissions.into_iter().collect());
        self
    }

    /// Checks whether the given role has the specified permission.
    pub fn has_permission(&self, role: UserRole, permission: Permission) -> bool {
        self.policies
            .get(&role)
            .map(|perms| perms.contains(&permission))
            .unwrap_or(false)
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
