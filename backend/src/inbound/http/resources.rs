//! Generic CRUD handlers registered once per resource kind.
//!
//! ```text
//! GET    /api/v1/<kind>/own
//! GET    /api/v1/<kind>/own/{id}
//! POST   /api/v1/<kind>
//! PUT    /api/v1/<kind>/own/{id}
//! DELETE /api/v1/<kind>/own/{id}
//! ```
//!
//! `<kind>` is one of `category`, `task`, `schedule` or `timersettings`.

use std::sync::Arc;

use actix_web::{HttpResponse, Scope, web};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::OwnedResourceService;
use crate::domain::resources::{
    CategoryRepresentation, ScheduleRepresentation, TaskRepresentation,
    TimerSettingsRepresentation,
};
use crate::domain::{Error, Representation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{json_error_handler, path_error_handler};
use crate::inbound::http::outcome::{respond, respond_created};
use crate::inbound::http::session::Caller;
use crate::inbound::http::state::HttpState;

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/api/v1";

/// A representation exposed over HTTP, tied to its service in [`HttpState`].
pub trait ResourceEndpoint: Representation + Serialize + DeserializeOwned {
    fn service(state: &HttpState) -> &Arc<dyn OwnedResourceService<Self>>;

    /// Collection path, e.g. `/api/v1/category`.
    fn collection_path() -> String {
        format!("{API_PREFIX}/{}", Self::KIND)
    }
}

impl ResourceEndpoint for CategoryRepresentation {
    fn service(state: &HttpState) -> &Arc<dyn OwnedResourceService<Self>> {
        &state.categories
    }
}

impl ResourceEndpoint for TaskRepresentation {
    fn service(state: &HttpState) -> &Arc<dyn OwnedResourceService<Self>> {
        &state.tasks
    }
}

impl ResourceEndpoint for ScheduleRepresentation {
    fn service(state: &HttpState) -> &Arc<dyn OwnedResourceService<Self>> {
        &state.schedules
    }
}

impl ResourceEndpoint for TimerSettingsRepresentation {
    fn service(state: &HttpState) -> &Arc<dyn OwnedResourceService<Self>> {
        &state.timer_settings
    }
}

fn parse_id(raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| {
        Error::invalid_request("id must be a valid UUID")
            .with_details(json!({ "field": "id", "value": raw, "code": "invalid_uuid" }))
    })
}

/// List every entity of kind `R` owned by the caller.
pub async fn get_own_all<R: ResourceEndpoint>(
    state: web::Data<HttpState>,
    caller: Caller,
) -> HttpResponse {
    respond(R::service(&state).get_own_all(&caller.0).await)
}

/// Fetch one entity: 200 for the owner, 403 for anyone else, 404 if absent.
pub async fn get_own_by_id<R: ResourceEndpoint>(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    Ok(respond(R::service(&state).get_own_by_id(&id, &caller.0).await))
}

/// Create an entity owned by the caller.
pub async fn add_one<R: ResourceEndpoint>(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<R>,
) -> ApiResult<HttpResponse> {
    let representation = payload.into_inner();
    representation.validate()?;
    let outcome = R::service(&state).add_one(representation, &caller.0).await;
    Ok(respond_created(outcome, &R::collection_path()))
}

/// Replace the root fields of an owned entity; the body id must match the path.
pub async fn update_one<R: ResourceEndpoint>(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<R>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let representation = payload.into_inner();
    if representation.id() != id {
        return Err(Error::invalid_request("path id does not match body id")
            .with_details(json!({ "field": "id", "code": "id_mismatch" })));
    }
    representation.validate()?;
    Ok(respond(
        R::service(&state).update_one(representation, &caller.0).await,
    ))
}

/// Delete an owned entity together with its children.
pub async fn delete_one_own<R: ResourceEndpoint>(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    Ok(respond(R::service(&state).delete_one_own(&id, &caller.0).await))
}

/// Routes for one kind, relative to [`API_PREFIX`].
pub fn resource_scope<R: ResourceEndpoint>() -> Scope {
    web::scope(&format!("/{}", R::KIND))
        .route("", web::post().to(add_one::<R>))
        .route("/own", web::get().to(get_own_all::<R>))
        .route("/own/{id}", web::get().to(get_own_by_id::<R>))
        .route("/own/{id}", web::put().to(update_one::<R>))
        .route("/own/{id}", web::delete().to(delete_one_own::<R>))
}

/// Register every resource kind plus the envelope-producing extractor configs.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use pomodoro_backend::inbound::http::resources;
///
/// let app = App::new().service(web::scope("/api/v1").configure(resources::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(resource_scope::<CategoryRepresentation>())
        .service(resource_scope::<TaskRepresentation>())
        .service(resource_scope::<ScheduleRepresentation>())
        .service(resource_scope::<TimerSettingsRepresentation>());
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;
