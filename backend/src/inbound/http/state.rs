//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only see driving
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::{CrudService, Representation};
use crate::domain::ports::{
    FixtureLoginService, InMemoryOwnedRepository, InMemoryOwnedStore, LoginService, MemoryTable,
    OwnedResourceService,
};
use crate::domain::resources::{
    CategoryRepresentation, ScheduleRepresentation, TaskRepresentation,
    TimerSettingsRepresentation,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub categories: Arc<dyn OwnedResourceService<CategoryRepresentation>>,
    pub tasks: Arc<dyn OwnedResourceService<TaskRepresentation>>,
    pub schedules: Arc<dyn OwnedResourceService<ScheduleRepresentation>>,
    pub timer_settings: Arc<dyn OwnedResourceService<TimerSettingsRepresentation>>,
}

impl HttpState {
    /// State backed by one process-local store and the fixture login roster.
    ///
    /// Every kind reads the same tables, so nested children created through
    /// a category are also served by their own kind's routes.
    ///
    /// # Examples
    /// ```
    /// use pomodoro_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::in_memory();
    /// # let _ = state;
    /// ```
    #[must_use]
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryOwnedStore::new());
        Self {
            login: Arc::new(FixtureLoginService),
            categories: in_memory_service::<CategoryRepresentation>(&store),
            tasks: in_memory_service::<TaskRepresentation>(&store),
            schedules: in_memory_service::<ScheduleRepresentation>(&store),
            timer_settings: in_memory_service::<TimerSettingsRepresentation>(&store),
        }
    }
}

fn in_memory_service<R>(store: &Arc<InMemoryOwnedStore>) -> Arc<dyn OwnedResourceService<R>>
where
    R: Representation,
    R::Entity: MemoryTable,
{
    Arc::new(CrudService::<R, _>::new(Arc::new(
        InMemoryOwnedRepository::<R::Entity>::with_store(Arc::clone(store)),
    )))
}
