//! Shared Diesel error mapping for the owned-resource repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::OwnedRepositoryError;

use super::pool::PoolError;

/// Map pool errors into repository connection errors.
pub fn map_pool_error(error: PoolError) -> OwnedRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    OwnedRepositoryError::connection(message)
}

/// Map Diesel errors into repository errors.
///
/// Unique violations become conflicts. Foreign key violations mean a write
/// pointed at a parent row the caller does not own (composite owner keys) or
/// one that does not exist.
pub fn map_diesel_error(error: DieselError) -> OwnedRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => OwnedRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => OwnedRepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => {
                OwnedRepositoryError::conflict("an object with this id already exists")
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                map_foreign_key_violation(info.constraint_name())
            }
            DatabaseErrorKind::ClosedConnection => {
                OwnedRepositoryError::connection("database connection error")
            }
            _ => OwnedRepositoryError::query("database error"),
        },
        _ => OwnedRepositoryError::query("database error"),
    }
}

fn map_foreign_key_violation(constraint_name: Option<&str>) -> OwnedRepositoryError {
    if let Some(kind) = constraint_name.and_then(referenced_kind) {
        return OwnedRepositoryError::missing_parent(kind);
    }
    warn!(
        constraint_name = ?constraint_name,
        "unrecognised foreign key violation"
    );
    OwnedRepositoryError::missing_parent("object")
}

/// Name the parent kind a foreign key constraint points at.
///
/// Constraint names follow `<table>_<column>_user_id_fkey`; the referencing
/// column is checked before the table prefix.
fn referenced_kind(constraint: &str) -> Option<&'static str> {
    if constraint.contains("category") {
        Some("category")
    } else if constraint.contains("timer_settings") {
        Some("timer settings")
    } else if constraint.contains("task") {
        Some("task")
    } else {
        None
    }
}
