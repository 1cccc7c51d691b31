//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use std::ffi::OsString;

use actix_web::cookie::SameSite;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pomodoro_backend::inbound::http::health::HealthState;
use pomodoro_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, SessionCookie, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let key = settings.session_key()?;
    let bind_addr = settings.bind_addr()?;

    let cookie = SessionCookie::new(key, settings.cookie_secure, SameSite::Lax);
    let mut config = ServerConfig::new(cookie, bind_addr);
    if let Some(database_url) = settings.database_url.as_deref() {
        if settings.run_migrations {
            run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool_config =
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
