//! Weekly timetable management.
//!
//! Every write re-runs the clash scan inside the store, so a slot that was
//! free when the dashboard pre-checked it can still be rejected with
//! `ScheduleConflict` if another writer got there first.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use campusdesk_auth::rbac::{Permission, RbacEnforcer};
use campusdesk_core::error::AppError;
use campusdesk_database::TimetableStore;
use campusdesk_entity::timetable::{ClashProbe, NewSlot, SlotPatch, TimetableSlot, Weekday, find_clash};

use crate::context::RequestContext;

/// Outcome of a read-only clash check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClashReport {
    /// Whether the probe overlaps an existing slot.
    pub clash: bool,
    /// The first overlapping slot, if any.
    pub conflicting_slot: Option<TimetableSlot>,
}

/// Timetable CRUD plus the clash pre-check.
#[derive(Debug, Clone)]
pub struct TimetableService {
    slots: Arc<dyn TimetableStore>,
    rbac: Arc<RbacEnforcer>,
}

impl TimetableService {
    /// Creates a new timetable service.
    pub fn new(slots: Arc<dyn TimetableStore>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { slots, rbac }
    }

    /// All slots, or one day's, ordered by day then start.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        day: Option<Weekday>,
    ) -> Result<Vec<TimetableSlot>, AppError> {
        self.rbac.require_permission(ctx.role, Permission::TimetableRead)?;
        match day {
            Some(day) => self.slots.list_by_day(day).await,
            None => self.slots.list().await,
        }
    }

    /// Adds a slot unless it clashes.
    pub async fn create(&self, ctx: &RequestContext, data: NewSlot) -> Result<TimetableSlot, AppError> {
        self.rbac
            .require_permission(ctx.role, Permission::TimetableManage)?;

        let slot = self
            .slots
            .create_checked(&TimetableSlot::from_new(data))
            .await?;
        info!(
            admin_id = %ctx.user_id,
            slot_id = %slot.id,
            day = %slot.day,
            room = %slot.room,
            start = %slot.start_time,
            end = %slot.end_time,
            "Timetable slot created"
        );
        Ok(slot)
    }

    /// Applies a partial update unless the resulting window clashes.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: SlotPatch,
    ) -> Result<TimetableSlot, AppError> {
        self.rbac
            .require_permission(ctx.role, Permission::TimetableManage)?;

        let mut slot = self
            .slots
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Timetable slot {id} not found")))?;
        patch.apply(&mut slot)?;
        let slot = self.slots.update_checked(&slot).await?;

        info!(admin_id = %ctx.user_id, slot_id = %id, "Timetable slot updated");
        Ok(slot)
    }

    /// Removes a slot.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.rbac
            .require_permission(ctx.role, Permission::TimetableManage)?;

        if !self.slots.delete(id).await? {
            return Err(AppError::not_found(format!("Timetable slot {id} not found")));
        }
        info!(admin_id = %ctx.user_id, slot_id = %id, "Timetable slot deleted");
        Ok(())
    }

    /// Reports whether `probe` would clash, without writing anything.
    pub async fn check(
        &self,
        ctx: &RequestContext,
        probe: &ClashProbe,
        ignore: Option<Uuid>,
    ) -> Result<ClashReport, AppError> {
        self.rbac.require_permission(ctx.role, Permission::TimetableRead)?;

        if probe.start_time >= probe.end_time {
            return Err(AppError::validation(format!(
                "startTime ({}) must be before endTime ({})",
                probe.start_time, probe.end_time
            )));
        }

        let day = self.slots.list_by_day(probe.day).await?;
        let hit = find_clash(&day, probe, ignore).cloned();
        Ok(ClashReport {
            clash: hit.is_some(),
            conflicting_slot: hit,
        })
    }
}
