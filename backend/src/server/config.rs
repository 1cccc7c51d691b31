//! Settings the HTTP server is assembled from.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use pomodoro_backend::outbound::persistence::DbPool;

/// Where resource kinds are persisted.
#[derive(Clone)]
pub enum ResourceStorage {
    /// One process-local store shared by every kind; lost on restart.
    InMemory,
    /// Diesel repositories over a PostgreSQL pool.
    Postgres(DbPool),
}

/// Policy for the session cookie guarding the API scope.
#[derive(Clone)]
pub struct SessionCookie {
    pub(crate) key: Key,
    pub(crate) secure: bool,
    pub(crate) same_site: SameSite,
}

impl SessionCookie {
    /// Sign and encrypt session cookies with `key`.
    #[must_use]
    pub const fn new(key: Key, secure: bool, same_site: SameSite) -> Self {
        Self {
            key,
            secure,
            same_site,
        }
    }
}

/// Everything `create_server` needs besides the health state.
pub struct ServerConfig {
    pub(crate) cookie: SessionCookie,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: ResourceStorage,
}

impl ServerConfig {
    /// Serve on `bind_addr` from in-memory storage.
    #[must_use]
    pub const fn new(cookie: SessionCookie, bind_addr: SocketAddr) -> Self {
        Self {
            cookie,
            bind_addr,
            storage: ResourceStorage::InMemory,
        }
    }

    /// Persist resources through the Diesel repositories on `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.storage = ResourceStorage::Postgres(pool);
        self
    }
}
