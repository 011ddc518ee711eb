//! Live session repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use campusdesk_core::error::{AppError, ErrorKind};
use campusdesk_core::result::AppResult;
use campusdesk_entity::session::{LiveSession, SessionStatus};

use crate::store::{SessionStore, missing};

/// PostgreSQL-backed live session store.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LiveSession>> {
        sqlx::query_as::<_, LiveSession>("SELECT * FROM live_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    async fn list(&self) -> AppResult<Vec<LiveSession>> {
        sqlx::query_as::<_, LiveSession>("SELECT * FROM live_sessions ORDER BY started_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sessions", e))
    }

    async fn list_active(&self) -> AppResult<Vec<LiveSession>> {
        sqlx::query_as::<_, LiveSession>(
            "SELECT * FROM live_sessions WHERE status = $1 ORDER BY started_at DESC",
        )
        .bind(SessionStatus::Live)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list active sessions", e)
        })
    }

    async fn create(&self, session: &LiveSession) -> AppResult<LiveSession> {
        sqlx::query_as::<_, LiveSession>(
            "INSERT INTO live_sessions (id, course, room, teacher, status, started_at, ended_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(session.id)
        .bind(&session.course)
        .bind(&session.room)
        .bind(&session.teacher)
        .bind(session.status)
        .bind(session.started_at)
        .bind(session.ended_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))
    }

    async fn update(&self, session: &LiveSession) -> AppResult<LiveSession> {
        sqlx::query_as::<_, LiveSession>(
            "UPDATE live_sessions SET course = $2, room = $3, teacher = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(session.id)
        .bind(&session.course)
        .bind(&session.room)
        .bind(&session.teacher)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update session", e))?
        .ok_or_else(|| missing("Session", session.id))
    }

    async fn end(&self, id: Uuid) -> AppResult<Option<LiveSession>> {
        sqlx::query_as::<_, LiveSession>(
            "UPDATE live_sessions SET status = $2, ended_at = NOW() \
             WHERE id = $1 AND status = $3 RETURNING *",
        )
        .bind(id)
        .bind(SessionStatus::Ended)
        .bind(SessionStatus::Live)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to end session", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM live_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete session", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_active(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM live_sessions WHERE status = $1")
            .bind(SessionStatus::Live)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count active sessions", e)
            })
    }
}
