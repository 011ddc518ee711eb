//! Room management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use campusdesk_auth::rbac::{Permission, RbacEnforcer};
use campusdesk_core::error::AppError;
use campusdesk_database::RoomStore;
use campusdesk_entity::room::{NewRoom, Room, RoomPatch};

use crate::context::RequestContext;

/// Room CRUD.
#[derive(Debug, Clone)]
pub struct RoomService {
    rooms: Arc<dyn RoomStore>,
    rbac: Arc<RbacEnforcer>,
}

impl RoomService {
    /// Creates a new room service.
    pub fn new(rooms: Arc<dyn RoomStore>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { rooms, rbac }
    }

    /// All rooms, by name.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Room>, AppError> {
        self.rbac.require_permission(ctx.role, Permission::RoomRead)?;
        self.rooms.list().await
    }

    /// Adds a room.
    pub async fn create(&self, ctx: &RequestContext, data: NewRoom) -> Result<Room, AppError> {
        self.rbac.require_permission(ctx.role, Permission::RoomManage)?;

        let room = self.rooms.create(&Room::from_new(data)).await?;
        info!(admin_id = %ctx.user_id, room_id = %room.id, code = %room.code, "Room created");
        Ok(room)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: RoomPatch,
    ) -> Result<Room, AppError> {
        self.rbac.require_permission(ctx.role, Permission::RoomManage)?;

        let mut room = self
            .rooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {id} not found")))?;
        patch.apply(&mut room)?;
        let room = self.rooms.update(&room).await?;

        info!(admin_id = %ctx.user_id, room_id = %id, "Room updated");
        Ok(room)
    }

    /// Removes a room.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.rbac.require_permission(ctx.role, Permission::RoomManage)?;

        if !self.rooms.delete(id).await? {
            return Err(AppError::not_found(format!("Room {id} not found")));
        }
        info!(admin_id = %ctx.user_id, room_id = %id, "Room deleted");
        Ok(())
    }
}
