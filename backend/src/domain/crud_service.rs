//! Generic ownership-scoped CRUD service.
//!
//! One implementation serves every resource kind. It is the only place that
//! turns raw repository results into [`Outcome`] tags, so status semantics
//! stay identical across kinds.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::ports::{OwnedRepository, OwnedRepositoryError, OwnedResourceService};
use crate::domain::{Outcome, OwnedEntity, OwnerVisibility, Representation, UserId, belongs_to};

/// Message returned when an update or delete matches nothing the caller owns.
pub const NOT_OWNED_MESSAGE: &str = "no object with such id for this user";
/// Message returned for storage faults; the cause is only logged.
pub const STORAGE_FAILURE_MESSAGE: &str = "storage failure";
/// Message returned when a write collides with a stored id.
pub const CONFLICT_MESSAGE: &str = "object conflicts with an existing one";

/// CRUD orchestration over an [`OwnedRepository`] for representation `R`.
pub struct CrudService<R, Repo> {
    repository: Arc<Repo>,
    representation: PhantomData<fn() -> R>,
}

impl<R, Repo> Clone for CrudService<R, Repo> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            representation: PhantomData,
        }
    }
}

impl<R, Repo> CrudService<R, Repo> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<Repo>) -> Self {
        Self {
            repository,
            representation: PhantomData,
        }
    }
}

impl<R, Repo> CrudService<R, Repo>
where
    R: Representation,
    Repo: OwnedRepository<R::Entity>,
{
    fn storage_failure<T>(operation: &'static str, err: &OwnedRepositoryError) -> Outcome<T> {
        error!(kind = R::KIND, operation, error = %err, "owned repository failed");
        Outcome::Error(STORAGE_FAILURE_MESSAGE.to_owned())
    }

    fn map_write_error<T>(operation: &'static str, err: OwnedRepositoryError) -> Outcome<T> {
        match err {
            OwnedRepositoryError::Conflict { message } => {
                debug!(kind = R::KIND, operation, %message, "write conflicted");
                Outcome::Conflict(CONFLICT_MESSAGE.to_owned())
            }
            OwnedRepositoryError::MissingReference { message } => {
                debug!(kind = R::KIND, operation, %message, "write referenced a missing parent");
                Outcome::Error(message)
            }
            other => Self::storage_failure(operation, &other),
        }
    }

    fn present(entity: &R::Entity) -> R {
        R::from_entity(entity, OwnerVisibility::Include)
    }
}

#[async_trait]
impl<R, Repo> OwnedResourceService<R> for CrudService<R, Repo>
where
    R: Representation,
    Repo: OwnedRepository<R::Entity>,
{
    async fn get_own_all(&self, caller: &UserId) -> Outcome<Vec<R>> {
        match self.repository.list_for_owner(caller).await {
            Ok(entities) => Outcome::Ok(entities.iter().map(Self::present).collect()),
            Err(err) => Self::storage_failure("get_own_all", &err),
        }
    }

    async fn get_own_by_id(&self, id: &Uuid, caller: &UserId) -> Outcome<R> {
        match self.repository.find_by_id(id).await {
            Ok(None) => Outcome::NotFound,
            Ok(Some(entity)) if !belongs_to(entity.owner(), caller) => {
                debug!(kind = R::KIND, %id, %caller, "read denied to non-owner");
                Outcome::Forbidden
            }
            Ok(Some(entity)) => Outcome::Ok(Self::present(&entity)),
            Err(err) => Self::storage_failure("get_own_by_id", &err),
        }
    }

    async fn add_one(&self, representation: R, caller: &UserId) -> Outcome<R> {
        let entity = representation.into_entity(caller);
        match self.repository.insert(entity).await {
            Ok(stored) => Outcome::Ok(Self::present(&stored)),
            Err(err) => Self::map_write_error("add_one", err),
        }
    }

    async fn update_one(&self, representation: R, caller: &UserId) -> Outcome<R> {
        let id = representation.id();
        match self.repository.find_if_owned(&id, caller).await {
            Ok(Some(_)) => {}
            Ok(None) => return Outcome::Error(NOT_OWNED_MESSAGE.to_owned()),
            Err(err) => return Self::storage_failure("update_one", &err),
        }
        match self.repository.update(representation.into_entity(caller)).await {
            Ok(Some(stored)) => Outcome::Ok(Self::present(&stored)),
            Ok(None) => Outcome::Error(NOT_OWNED_MESSAGE.to_owned()),
            Err(err) => Self::map_write_error("update_one", err),
        }
    }

    async fn delete_one_own(&self, id: &Uuid, caller: &UserId) -> Outcome<()> {
        match self.repository.delete_if_owned(id, caller).await {
            Ok(0) => Outcome::Error(NOT_OWNED_MESSAGE.to_owned()),
            Ok(_) => Outcome::NoContent,
            Err(err) => Self::storage_failure("delete_one_own", &err),
        }
    }
}

#[cfg(test)]
#[path = "crud_service_tests.rs"]
mod tests;
