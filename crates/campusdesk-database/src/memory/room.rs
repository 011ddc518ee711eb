//! In-memory room store.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use campusdesk_core::error::AppError;
use campusdesk_core::result::AppResult;
use campusdesk_entity::room::Room;

use crate::store::{RoomStore, missing};

/// Room store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryRoomStore {
    rows: DashMap<Uuid, Room>,
    write: Mutex<()>,
}

impl MemoryRoomStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_code_free(&self, room: &Room) -> AppResult<()> {
        let taken = self
            .rows
            .iter()
            .any(|r| r.id != room.id && r.code.eq_ignore_ascii_case(&room.code));
        if taken {
            return Err(AppError::conflict(format!(
                "Room code '{}' already exists",
                room.code
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        Ok(self.rows.get(&id).map(|r| r.clone()))
    }

    async fn list(&self) -> AppResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self.rows.iter().map(|r| r.clone()).collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
        Ok(rooms)
    }

    async fn create(&self, room: &Room) -> AppResult<Room> {
        let _guard = self.write.lock().await;
        self.ensure_code_free(room)?;
        self.rows.insert(room.id, room.clone());
        Ok(room.clone())
    }

    async fn update(&self, room: &Room) -> AppResult<Room> {
        let _guard = self.write.lock().await;
        self.ensure_code_free(room)?;
        let mut row = self.rows.get_mut(&room.id).ok_or_else(|| missing("Room", room.id))?;
        *row = room.clone();
        Ok(room.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.rows.remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.rows.len() as i64)
    }
}
