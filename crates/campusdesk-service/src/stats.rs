//! Dashboard overview counters.

use std::sync::Arc;

use chrono::Datelike;

use campusdesk_auth::rbac::{Permission, RbacEnforcer};
use campusdesk_core::error::AppError;
use campusdesk_database::Stores;
use campusdesk_entity::stats::OverviewStats;
use campusdesk_entity::timetable::Weekday;
use campusdesk_entity::user::UserRole;

use crate::context::RequestContext;

/// Computes [`OverviewStats`] across all stores.
#[derive(Debug, Clone)]
pub struct StatsService {
    stores: Stores,
    rbac: Arc<RbacEnforcer>,
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(stores: Stores, rbac: Arc<RbacEnforcer>) -> Self {
        Self { stores, rbac }
    }

    /// Counters as of today (server local time).
    pub async fn overview(&self, ctx: &RequestContext) -> Result<OverviewStats, AppError> {
        self.overview_on(ctx, chrono::Local::now().weekday()).await
    }

    /// Counters with `today` as the current weekday.
    pub async fn overview_on(
        &self,
        ctx: &RequestContext,
        today: chrono::Weekday,
    ) -> Result<OverviewStats, AppError> {
        self.rbac.require_permission(ctx.role, Permission::StatsView)?;

        let todays_bookings = match Weekday::from_chrono(today) {
            Some(day) => self.stores.timetables.count_by_day(day).await?,
            None => 0,
        };

        Ok(OverviewStats {
            total_users: self.stores.users.count().await?,
            total_rooms: self.stores.rooms.count().await?,
            active_sessions: self.stores.sessions.count_active().await?,
            todays_bookings,
            total_admins: self
                .stores
                .users
                .count_by_roles(&[UserRole::Admin, UserRole::Hod])
                .await?,
        })
    }
}
