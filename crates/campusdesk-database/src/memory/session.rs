//! In-memory live session store.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use campusdesk_core::result::AppResult;
use campusdesk_entity::session::LiveSession;

use crate::store::{SessionStore, missing};

/// Session store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    rows: DashMap<Uuid, LiveSession>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first(&self, live_only: bool) -> Vec<LiveSession> {
        let mut sessions: Vec<LiveSession> = self
            .rows
            .iter()
            .filter(|r| !live_only || r.is_live())
            .map(|r| r.clone())
            .collect();
        sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        sessions
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LiveSession>> {
        Ok(self.rows.get(&id).map(|r| r.clone()))
    }

    async fn list(&self) -> AppResult<Vec<LiveSession>> {
        Ok(self.newest_first(false))
    }

    async fn list_active(&self) -> AppResult<Vec<LiveSession>> {
        Ok(self.newest_first(true))
    }

    async fn create(&self, session: &LiveSession) -> AppResult<LiveSession> {
        self.rows.insert(session.id, session.clone());
        Ok(session.clone())
    }

    async fn update(&self, session: &LiveSession) -> AppResult<LiveSession> {
        let mut row = self
            .rows
            .get_mut(&session.id)
            .ok_or_else(|| missing("Session", session.id))?;
        row.course = session.course.clone();
        row.room = session.room.clone();
        row.teacher = session.teacher.clone();
        Ok(row.clone())
    }

    async fn end(&self, id: Uuid) -> AppResult<Option<LiveSession>> {
        Ok(self
            .rows
            .get_mut(&id)
            .and_then(|mut row| row.end().ok().map(|()| row.clone())))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.rows.remove(&id).is_some())
    }

    async fn count_active(&self) -> AppResult<i64> {
        Ok(self.rows.iter().filter(|r| r.is_live()).count() as i64)
    }
}
