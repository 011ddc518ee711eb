//! Construction of the service graph from configuration and stores.

use std::sync::Arc;

use campusdesk_auth::jwt::{JwtDecoder, JwtEncoder};
use campusdesk_auth::password::{PasswordHasher, PasswordValidator};
use campusdesk_auth::rbac::RbacEnforcer;
use campusdesk_core::config::AppConfig;
use campusdesk_database::Stores;

use crate::auth::AuthService;
use crate::room::RoomService;
use crate::session::SessionService;
use crate::stats::StatsService;
use crate::timetable::TimetableService;
use crate::user::AdminUserService;

/// Every service, wired once at start-up and shared by reference.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Login and profile.
    pub auth: Arc<AuthService>,
    /// Admin user management.
    pub users: Arc<AdminUserService>,
    /// Rooms.
    pub rooms: Arc<RoomService>,
    /// Weekly timetable.
    pub timetables: Arc<TimetableService>,
    /// Live sessions.
    pub sessions: Arc<SessionService>,
    /// Overview counters.
    pub stats: Arc<StatsService>,
    /// Token verification for the HTTP layer.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Shared RBAC enforcer.
    pub rbac: Arc<RbacEnforcer>,
}

impl ServiceContext {
    /// Wire all services against `stores`.
    pub fn new(config: &AppConfig, stores: &Stores) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let rbac = Arc::new(RbacEnforcer::new());

        Self {
            auth: Arc::new(AuthService::new(
                stores.users.clone(),
                hasher.clone(),
                encoder,
            )),
            users: Arc::new(AdminUserService::new(
                stores.users.clone(),
                hasher,
                validator,
                rbac.clone(),
            )),
            rooms: Arc::new(RoomService::new(stores.rooms.clone(), rbac.clone())),
            timetables: Arc::new(TimetableService::new(
                stores.timetables.clone(),
                rbac.clone(),
            )),
            sessions: Arc::new(SessionService::new(stores.sessions.clone(), rbac.clone())),
            stats: Arc::new(StatsService::new(stores.clone(), rbac.clone())),
            jwt_decoder,
            rbac,
        }
    }
}
