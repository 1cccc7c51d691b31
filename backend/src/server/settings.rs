//! Process settings loaded via OrthoConfig.
//!
//! Values come from `POMODORO_*` environment variables, configuration files
//! and CLI flags, in the precedence OrthoConfig applies.

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
/// `Key::derive_from` needs at least this much key material.
const MIN_SESSION_KEY_BYTES: usize = 32;

/// Settings controlling the HTTP listener, storage and session cookie.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POMODORO")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; resources are kept in memory when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Allow a random session key when the key file cannot be read.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
}

impl AppSettings {
    /// Parse the configured listen address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw}: {err}"),
            )
        })
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    /// Load the session key, falling back to an ephemeral key in debug builds
    /// or when explicitly allowed.
    pub fn session_key(&self) -> io::Result<Key> {
        let path = self.session_key_file();
        let allow_ephemeral = cfg!(debug_assertions) || self.session_allow_ephemeral;
        resolve_session_key(path, std::fs::read(path), allow_ephemeral)
    }
}

fn resolve_session_key(
    path: &Path,
    material: io::Result<Vec<u8>>,
    allow_ephemeral: bool,
) -> io::Result<Key> {
    let failure = match material {
        Ok(bytes) if bytes.len() >= MIN_SESSION_KEY_BYTES => return Ok(Key::derive_from(&bytes)),
        Ok(bytes) => format!(
            "session key at {} is {} bytes; at least {MIN_SESSION_KEY_BYTES} are required",
            path.display(),
            bytes.len()
        ),
        Err(err) => format!("failed to read session key at {}: {err}", path.display()),
    };
    if allow_ephemeral {
        warn!(path = %path.display(), reason = %failure, "using temporary session key (dev only)");
        Ok(Key::generate())
    } else {
        Err(io::Error::other(failure))
    }
}
