//! Timetable slot repository implementation.
//!
//! Checked writes take a transaction-scoped advisory lock keyed on the
//! slot's day and normalized room label, so concurrent writers for the same
//! room and day run their clash scan one at a time.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use campusdesk_core::error::{AppError, ErrorKind};
use campusdesk_core::result::AppResult;
use campusdesk_entity::timetable::{ClashProbe, TimetableSlot, Weekday, find_clash};

use crate::store::{TimetableStore, clash_error, missing};

/// PostgreSQL-backed timetable store.
#[derive(Debug, Clone)]
pub struct TimetableRepository {
    pool: PgPool,
}

impl TimetableRepository {
    /// Create a new timetable repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    /// Lock the (day, room) pair for the rest of the transaction and scan
    /// it for clashes.
    async fn lock_and_scan(
        tx: &mut Transaction<'static, Postgres>,
        slot: &TimetableSlot,
        ignore: Option<Uuid>,
    ) -> AppResult<()> {
        let key = format!("{}:{}", slot.day, slot.room.trim().to_lowercase());
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(&key)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to lock timetable slot", e)
            })?;

        let existing = sqlx::query_as::<_, TimetableSlot>(
            "SELECT * FROM timetable_slots WHERE day = $1 AND LOWER(TRIM(room)) = LOWER(TRIM($2))",
        )
        .bind(slot.day)
        .bind(&slot.room)
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to scan timetable", e))?;

        if let Some(hit) = find_clash(&existing, &ClashProbe::from(slot), ignore) {
            debug!(slot_id = %slot.id, clashes_with = %hit.id, "Timetable clash");
            return Err(clash_error(hit));
        }
        Ok(())
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}

#[async_trait]
impl TimetableStore for TimetableRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TimetableSlot>> {
        sqlx::query_as::<_, TimetableSlot>("SELECT * FROM timetable_slots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find timetable slot", e)
            })
    }

    async fn list(&self) -> AppResult<Vec<TimetableSlot>> {
        sqlx::query_as::<_, TimetableSlot>(
            "SELECT * FROM timetable_slots ORDER BY day ASC, start_time ASC, room ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list timetable", e))
    }

    async fn list_by_day(&self, day: Weekday) -> AppResult<Vec<TimetableSlot>> {
        sqlx::query_as::<_, TimetableSlot>(
            "SELECT * FROM timetable_slots WHERE day = $1 ORDER BY start_time ASC, room ASC",
        )
        .bind(day)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list timetable by day", e)
        })
    }

    async fn create_checked(&self, slot: &TimetableSlot) -> AppResult<TimetableSlot> {
        let mut tx = self.begin().await?;
        Self::lock_and_scan(&mut tx, slot, None).await?;

        let created = sqlx::query_as::<_, TimetableSlot>(
            "INSERT INTO timetable_slots \
             (id, course, teacher, room, day, start_time, end_time, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(slot.id)
        .bind(&slot.course)
        .bind(&slot.teacher)
        .bind(&slot.room)
        .bind(slot.day)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.created_at)
        .bind(slot.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create timetable slot", e)
        })?;

        Self::commit(tx).await?;
        Ok(created)
    }

    async fn update_checked(&self, slot: &TimetableSlot) -> AppResult<TimetableSlot> {
        let mut tx = self.begin().await?;
        Self::lock_and_scan(&mut tx, slot, Some(slot.id)).await?;

        let updated = sqlx::query_as::<_, TimetableSlot>(
            "UPDATE timetable_slots SET course = $2, teacher = $3, room = $4, day = $5, \
             start_time = $6, end_time = $7, updated_at = $8 \
             WHERE id = $1 RETURNING *",
        )
        .bind(slot.id)
        .bind(&slot.course)
        .bind(&slot.teacher)
        .bind(&slot.room)
        .bind(slot.day)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.updated_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update timetable slot", e)
        })?
        .ok_or_else(|| missing("Timetable slot", slot.id))?;

        Self::commit(tx).await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM timetable_slots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete timetable slot", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_day(&self, day: Weekday) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM timetable_slots WHERE day = $1")
            .bind(day)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count timetable slots", e)
            })
    }
}
