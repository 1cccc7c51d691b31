//! Ownership-scoped Pomodoro backend.
//!
//! - `domain`: resource kinds, the ownership model and the generic CRUD
//!   service.
//! - `inbound::http`: actix-web handlers registered once per resource kind.
//! - `outbound::persistence`: Diesel repositories over PostgreSQL.
//! - `middleware`: request tracing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
