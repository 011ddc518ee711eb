//! # campusdesk-database
//!
//! Store traits for every CampusDesk entity, with a PostgreSQL
//! implementation (sqlx repositories) and an in-memory implementation
//! selected by `database.backend`.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

use std::sync::Arc;

use tracing::info;

use campusdesk_core::config::{DatabaseConfig, StoreBackend};
use campusdesk_core::result::AppResult;

pub use connection::DatabasePool;
pub use store::{RoomStore, SessionStore, TimetableStore, UserStore};

/// One handle per store, shared by all services.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Staff accounts.
    pub users: Arc<dyn UserStore>,
    /// Rooms.
    pub rooms: Arc<dyn RoomStore>,
    /// Weekly timetable.
    pub timetables: Arc<dyn TimetableStore>,
    /// Live sessions.
    pub sessions: Arc<dyn SessionStore>,
    /// The pool behind the PostgreSQL stores, if any.
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Connect the configured backend, running migrations when enabled.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            StoreBackend::Postgres => {
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    migration::run_migrations(db.pool()).await?;
                }
                Ok(Self::postgres(db))
            }
            StoreBackend::Memory => {
                info!("Using in-memory stores; data is lost on restart");
                Ok(Self::memory())
            }
        }
    }

    /// Stores backed by PostgreSQL repositories.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(repositories::UserRepository::new(pool.clone())),
            rooms: Arc::new(repositories::RoomRepository::new(pool.clone())),
            timetables: Arc::new(repositories::TimetableRepository::new(pool.clone())),
            sessions: Arc::new(repositories::SessionRepository::new(pool)),
            pool: Some(db),
        }
    }

    /// Empty process-local stores.
    pub fn memory() -> Self {
        Self {
            users: Arc::new(memory::MemoryUserStore::new()),
            rooms: Arc::new(memory::MemoryRoomStore::new()),
            timetables: Arc::new(memory::MemoryTimetableStore::new()),
            sessions: Arc::new(memory::MemorySessionStore::new()),
            pool: None,
        }
    }

    /// The PostgreSQL pool, when that backend is in use.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }

    /// Whether the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(db) => db.health_check().await,
            None => Ok(true),
        }
    }

    /// Release pooled connections.
    pub async fn close(&self) {
        if let Some(db) = &self.pool {
            db.close().await;
        }
    }
}
