//! Domain ports: the traits adapters implement or call.

mod macros;
pub(crate) use macros::define_port_error;

mod in_memory_owned_store;
mod login_service;
mod owned_repository;
mod owned_resource_service;

pub use in_memory_owned_store::{
    InMemoryOwnedRepository, InMemoryOwnedStore, MemoryTable, MemoryTables,
};
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use owned_repository::MockOwnedRepository;
pub use owned_repository::{OwnedRepository, OwnedRepositoryError};
pub use owned_resource_service::OwnedResourceService;
