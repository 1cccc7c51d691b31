//! Driven port for ownership-scoped storage of one resource kind.
//!
//! Implementations return raw presence, absence and row counts. Deciding
//! whether a miss means "not found", "forbidden" or "rejected" is left to
//! [`CrudService`](crate::domain::CrudService).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{OwnedEntity, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by owned repository adapters.
    pub enum OwnedRepositoryError {
        /// Storage could not be reached or a connection was lost.
        Connection { message: String } =>
            "owned repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "owned repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } =>
            "owned repository conflict: {message}",
        /// The write points at a parent the caller does not own. The
        /// message is safe to show to that caller.
        MissingReference { message: String } =>
            "owned repository missing reference: {message}",
    }
}

impl OwnedRepositoryError {
    /// A write named a `kind` parent that its owner does not hold.
    #[must_use]
    pub fn missing_parent(kind: &str) -> Self {
        Self::missing_reference(format!("referenced {kind} does not exist for this user"))
    }
}

/// Port for reading and writing entities scoped to their owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnedRepository<E: OwnedEntity>: Send + Sync {
    /// All entities owned by `owner`, with their children.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<E>, OwnedRepositoryError>;

    /// Look up an entity regardless of who owns it.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<E>, OwnedRepositoryError>;

    /// Look up an entity only when `owner` owns it.
    async fn find_if_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<E>, OwnedRepositoryError>;

    /// Persist a new entity graph in one unit of work, assigning missing ids.
    async fn insert(&self, entity: E) -> Result<E, OwnedRepositoryError>;

    /// Rewrite the root's scalar fields where both id and owner match.
    ///
    /// Returns `None` when no stored entity matched. Children are left as
    /// stored and returned alongside the updated root.
    async fn update(&self, entity: E) -> Result<Option<E>, OwnedRepositoryError>;

    /// Remove an owned entity and its children, returning the rows removed.
    async fn delete_if_owned(&self, id: &Uuid, owner: &UserId)
    -> Result<u64, OwnedRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn conflict_error_formats_message() {
        let err = OwnedRepositoryError::conflict("duplicate key");
        assert!(err.to_string().contains("duplicate key"));
    }

    #[rstest]
    fn missing_parent_names_the_kind() {
        let err = OwnedRepositoryError::missing_parent("category");
        assert_eq!(
            err,
            OwnedRepositoryError::missing_reference(
                "referenced category does not exist for this user"
            )
        );
    }
}
