//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each owned resource kind has a repository implementing
//! [`OwnedRepository`](crate::domain::ports::OwnedRepository) over a shared
//! `bb8` pool of `diesel-async` connections.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   entities. Ownership decisions stay in the domain service.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Graph writes**: a root and its children are inserted in one
//!   transaction; deletes cascade through owner-scoped foreign keys.
//!
//! # Example
//!
//! ```no_run
//! use pomodoro_backend::outbound::persistence::{DbPool, DieselTaskRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), pomodoro_backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pomodoro")).await?;
//! let tasks = DieselTaskRepository::new(pool);
//! # let _ = tasks;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_category_repository;
mod diesel_schedule_repository;
mod diesel_task_repository;
mod diesel_timer_settings_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_schedule_repository::DieselScheduleRepository;
pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_timer_settings_repository::DieselTimerSettingsRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
