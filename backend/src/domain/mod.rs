//! Domain primitives, resource kinds and the CRUD use-case.
//!
//! Public surface:
//! - `UserId`, `TraceId`, `Error`/`ErrorCode`: identity, correlation and the
//!   boundary error envelope.
//! - `belongs_to`, `OwnedEntity`, `Representation`, `OwnerVisibility`: the
//!   ownership model and mapper contract shared by every kind.
//! - `resources`: category, task, schedule, timer settings and pomodoro.
//! - `CrudService`, `Outcome`: the generic service and its result vocabulary.
//! - `ports`: repository and service traits for adapters.

pub mod auth;
pub mod crud_service;
pub mod error;
pub mod mapping;
pub mod outcome;
pub mod ownership;
pub mod ports;
pub mod resources;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::crud_service::{CrudService, NOT_OWNED_MESSAGE, STORAGE_FAILURE_MESSAGE};
pub use self::error::{Error, ErrorCode};
pub use self::mapping::{OwnerVisibility, Representation};
pub use self::outcome::Outcome;
pub use self::ownership::{OwnedEntity, belongs_to};
pub use self::resources::{
    Category, CategoryRepresentation, Pomodoro, PomodoroRepresentation, Schedule,
    ScheduleRepresentation, Task, TaskRepresentation, TimerSettings, TimerSettingsRepresentation,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserIdValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pomodoro_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
