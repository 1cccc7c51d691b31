//! Driving port for the per-kind CRUD use-cases.
//!
//! Inbound adapters hold one `Arc<dyn OwnedResourceService<R>>` per resource
//! kind so handler tests can swap in a double without wiring storage.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Outcome, Representation, UserId};

/// Ownership-scoped create, read, update and delete for one kind.
#[async_trait]
pub trait OwnedResourceService<R: Representation>: Send + Sync {
    /// Every representation owned by `caller`; an empty list is still `Ok`.
    async fn get_own_all(&self, caller: &UserId) -> Outcome<Vec<R>>;

    /// One representation, split into not-found and forbidden on a miss.
    async fn get_own_by_id(&self, id: &Uuid, caller: &UserId) -> Outcome<R>;

    /// Persist `representation` as owned by `caller`.
    async fn add_one(&self, representation: R, caller: &UserId) -> Outcome<R>;

    /// Update the caller's entity carrying `representation`'s id.
    async fn update_one(&self, representation: R, caller: &UserId) -> Outcome<R>;

    /// Remove the caller's entity and its owned children.
    async fn delete_one_own(&self, id: &Uuid, caller: &UserId) -> Outcome<()>;
}
