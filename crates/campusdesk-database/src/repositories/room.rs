//! Room repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use campusdesk_core::error::{AppError, ErrorKind};
use campusdesk_core::result::AppResult;
use campusdesk_entity::room::Room;

use crate::store::{RoomStore, missing};

/// PostgreSQL-backed room store.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, code: &str, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("rooms_code_key") => {
            AppError::conflict(format!("Room code '{code}' already exists"))
        }
        _ => AppError::with_source(ErrorKind::Database, format!("Failed to {action} room"), e),
    }
}

#[async_trait]
impl RoomStore for RoomRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find room", e))
    }

    async fn list(&self) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms ORDER BY name ASC, code ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list rooms", e))
    }

    async fn create(&self, room: &Room) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (id, name, code, capacity, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(room.id)
        .bind(&room.name)
        .bind(&room.code)
        .bind(room.capacity)
        .bind(room.status)
        .bind(room.created_at)
        .bind(room.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &room.code, "create"))
    }

    async fn update(&self, room: &Room) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET name = $2, code = $3, capacity = $4, status = $5, updated_at = $6 \
             WHERE id = $1 RETURNING *",
        )
        .bind(room.id)
        .bind(&room.name)
        .bind(&room.code)
        .bind(room.capacity)
        .bind(room.status)
        .bind(room.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &room.code, "update"))?
        .ok_or_else(|| missing("Room", room.id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete room", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count rooms", e))
    }
}
