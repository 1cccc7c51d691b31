//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the login and health paths, the error envelope and
//! the client representation of every resource kind. The generic CRUD routes
//! under `/api/v1/<kind>` share one shape and are described by the tag list.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    CategoryRepresentation, Error, ErrorCode, PomodoroRepresentation, ScheduleRepresentation,
    TaskRepresentation, TimerSettingsRepresentation,
};
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pomodoro backend API",
        description = "Ownership-scoped CRUD over categories, tasks, schedules and timer settings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        CategoryRepresentation,
        TaskRepresentation,
        ScheduleRepresentation,
        TimerSettingsRepresentation,
        PomodoroRepresentation,
    )),
    tags(
        (name = "users", description = "Session login"),
        (name = "category", description = "GET /own, GET /own/{id}, POST, PUT /own/{id}, DELETE /own/{id}"),
        (name = "task", description = "Same routes as category"),
        (name = "schedule", description = "Same routes as category"),
        (name = "timersettings", description = "Same routes as category"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "traceId")]
    #[case("CategoryRepresentation", "appUserId")]
    #[case("CategoryRepresentation", "tasks")]
    #[case("TaskRepresentation", "allocatedTime")]
    #[case("TimerSettingsRepresentation", "longBreakInterval")]
    fn schemas_use_camel_case_fields(#[case] schema: &str, #[case] field: &str) {
        assert!(
            schema_fields(schema).iter().any(|name| name == field),
            "{schema} should expose {field}"
        );
    }

    #[rstest]
    fn documents_login_and_health_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/api/v1/login", "/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
