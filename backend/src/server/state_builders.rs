//! Builders wiring resource kinds to their storage adapters.

use std::sync::Arc;

use actix_web::web;

use pomodoro_backend::domain::ports::{FixtureLoginService, OwnedRepository, OwnedResourceService};
use pomodoro_backend::domain::{
    CategoryRepresentation, CrudService, Representation, ScheduleRepresentation,
    TaskRepresentation, TimerSettingsRepresentation,
};
use pomodoro_backend::inbound::http::state::HttpState;
use pomodoro_backend::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselScheduleRepository, DieselTaskRepository,
    DieselTimerSettingsRepository,
};
use tracing::{info, warn};

use super::{ResourceStorage, ServerConfig};

/// Wrap a repository in the generic CRUD service for representation `R`.
fn crud_service<R, Repo>(repository: Repo) -> Arc<dyn OwnedResourceService<R>>
where
    R: Representation,
    Repo: OwnedRepository<R::Entity> + 'static,
{
    Arc::new(CrudService::<R, Repo>::new(Arc::new(repository)))
}

fn diesel_http_state(pool: &DbPool) -> HttpState {
    HttpState {
        login: Arc::new(FixtureLoginService),
        categories: crud_service::<CategoryRepresentation, _>(DieselCategoryRepository::new(
            pool.clone(),
        )),
        tasks: crud_service::<TaskRepresentation, _>(DieselTaskRepository::new(pool.clone())),
        schedules: crud_service::<ScheduleRepresentation, _>(DieselScheduleRepository::new(
            pool.clone(),
        )),
        timer_settings: crud_service::<TimerSettingsRepresentation, _>(
            DieselTimerSettingsRepository::new(pool.clone()),
        ),
    }
}

/// Build the shared HTTP state, using PostgreSQL when a pool is configured
/// and in-memory stores otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.storage {
        ResourceStorage::Postgres(pool) => {
            info!("serving resources from PostgreSQL");
            diesel_http_state(pool)
        }
        ResourceStorage::InMemory => {
            warn!("no database configured; resources are kept in memory");
            HttpState::in_memory()
        }
    };
    web::Data::new(state)
}
