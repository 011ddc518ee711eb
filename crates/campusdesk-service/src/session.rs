//! Live session tracking.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use campusdesk_auth::rbac::{Permission, RbacEnforcer};
use campusdesk_core::error::AppError;
use campusdesk_database::SessionStore;
use campusdesk_entity::session::{LiveSession, NewSession, SessionPatch, already_ended};

use crate::context::RequestContext;

/// Starts, edits and ends live sessions.
#[derive(Debug, Clone)]
pub struct SessionService {
    sessions: Arc<dyn SessionStore>,
    rbac: Arc<RbacEnforcer>,
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(sessions: Arc<dyn SessionStore>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { sessions, rbac }
    }

    /// All sessions, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<LiveSession>, AppError> {
        self.rbac.require_permission(ctx.role, Permission::SessionRead)?;
        self.sessions.list().await
    }

    /// Sessions still `LIVE`, newest first.
    pub async fn list_active(&self, ctx: &RequestContext) -> Result<Vec<LiveSession>, AppError> {
        self.rbac.require_permission(ctx.role, Permission::SessionRead)?;
        self.sessions.list_active().await
    }

    /// Starts a session now.
    pub async fn start(&self, ctx: &RequestContext, data: NewSession) -> Result<LiveSession, AppError> {
        self.rbac
            .require_permission(ctx.role, Permission::SessionManage)?;

        let session = self.sessions.create(&LiveSession::start(data)).await?;
        info!(
            admin_id = %ctx.user_id,
            session_id = %session.id,
            course = %session.course,
            room = %session.room,
            "Live session started"
        );
        Ok(session)
    }

    /// Edits course, room or teacher.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: SessionPatch,
    ) -> Result<LiveSession, AppError> {
        self.rbac
            .require_permission(ctx.role, Permission::SessionManage)?;

        let mut session = self.find(id).await?;
        patch.apply(&mut session)?;
        self.sessions.update(&session).await
    }

    /// Marks a session `ENDED`. Ending it twice is a `Conflict`.
    pub async fn end(&self, ctx: &RequestContext, id: Uuid) -> Result<LiveSession, AppError> {
        self.rbac
            .require_permission(ctx.role, Permission::SessionManage)?;

        if !self.find(id).await?.is_live() {
            return Err(already_ended(id));
        }
        let session = self
            .sessions
            .end(id)
            .await?
            .ok_or_else(|| already_ended(id))?;

        info!(admin_id = %ctx.user_id, session_id = %id, "Live session ended");
        Ok(session)
    }

    /// Removes a session record.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.rbac
            .require_permission(ctx.role, Permission::SessionManage)?;

        if !self.sessions.delete(id).await? {
            return Err(AppError::not_found(format!("Session {id} not found")));
        }
        info!(admin_id = %ctx.user_id, session_id = %id, "Live session deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<LiveSession, AppError> {
        self.sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Session {id} not found")))
    }
}
