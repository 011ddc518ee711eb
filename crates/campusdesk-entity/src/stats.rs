//! Dashboard overview counters.

use serde::{Deserialize, Serialize};

/// Aggregate counts shown on the dashboard landing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_users: i64,
    pub total_rooms: i64,
    /// Sessions currently `LIVE`.
    pub active_sessions: i64,
    /// Slots scheduled on today's weekday; 0 on Sunday.
    pub todays_bookings: i64,
    /// Users holding `ADMIN` or `HOD`.
    pub total_admins: i64,
}
