//! Tests for the generic resource handlers.

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::NOT_OWNED_MESSAGE;
use crate::inbound::http::test_utils::test_session_middleware;
use crate::inbound::http::users::{LoginRequest, login};

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::in_memory()))
        .wrap(test_session_middleware())
        .service(web::scope(API_PREFIX).service(login).configure(configure))
}

trait TestService:
    actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >
{
}

impl<S> TestService for S where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >
{
}

async fn login_as(app: &impl TestService, username: &str) -> Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(LoginRequest {
            username: username.into(),
            password: "password".into(),
        })
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success());
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

async fn post_json(
    app: &impl TestService,
    cookie: &Cookie<'static>,
    uri: &str,
    body: Value,
) -> actix_web::dev::ServiceResponse {
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

async fn create_category(app: &impl TestService, cookie: &Cookie<'static>, body: Value) -> Value {
    let response = post_json(app, cookie, "/api/v1/category", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    actix_test::read_body_json(response).await
}

#[rstest]
#[case("GET", "/api/v1/category/own")]
#[case("GET", "/api/v1/task/own/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[case("DELETE", "/api/v1/schedule/own/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[actix_web::test]
async fn anonymous_requests_are_unauthorised(#[case] method: &str, #[case] uri: &str) {
    let app = actix_test::init_service(test_app()).await;
    let request = match method {
        "GET" => actix_test::TestRequest::get(),
        _ => actix_test::TestRequest::delete(),
    }
    .uri(uri)
    .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn create_returns_location_and_nested_children_with_ids() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_as(&app, "admin").await;

    let response = post_json(
        &app,
        &cookie,
        "/api/v1/category",
        json!({
            "name": "Work",
            "tasks": [{ "name": "Report", "pomodoros": [
                { "startedAt": "2024-05-01T09:00:00Z", "duration": 1500 }
            ]}],
            "schedules": [{
                "title": "Morning",
                "startsAt": "2024-05-01T08:00:00Z",
                "endsAt": "2024-05-01T10:00:00Z"
            }]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("location header");
    let body: Value = actix_test::read_body_json(response).await;
    let id = body["id"].as_str().expect("generated id");
    assert_eq!(location, format!("/api/v1/category/own/{id}"));
    assert_eq!(body["appUserId"], "123e4567-e89b-12d3-a456-426614174000");

    let task = &body["tasks"][0];
    assert_eq!(task["categoryId"], id);
    assert_eq!(task["appUserId"], body["appUserId"]);
    assert_eq!(task["pomodoros"][0]["taskId"], task["id"]);
    assert_eq!(body["schedules"][0]["categoryId"], id);
}

#[actix_web::test]
async fn listing_only_shows_the_callers_entities() {
    let app = actix_test::init_service(test_app()).await;
    let admin = login_as(&app, "admin").await;
    let guest = login_as(&app, "guest").await;
    create_category(&app, &admin, json!({ "name": "Work" })).await;

    for (cookie, expected) in [(&admin, 1), (&guest, 0)] {
        let request = actix_test::TestRequest::get()
            .uri("/api/v1/category/own")
            .cookie(cookie.clone())
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<Value> = actix_test::read_body_json(response).await;
        assert_eq!(body.len(), expected);
    }
}

#[actix_web::test]
async fn invalid_payloads_are_rejected_before_reaching_storage() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_as(&app, "admin").await;

    let response = post_json(
        &app,
        &cookie,
        "/api/v1/timersettings",
        json!({
            "name": "Too fast",
            "workDuration": 10,
            "shortBreak": 300,
            "longBreak": 900,
            "longBreakInterval": 4
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "workDuration");
}

#[actix_web::test]
async fn malformed_json_uses_the_error_envelope() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_as(&app, "admin").await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/category")
        .cookie(cookie)
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "invalid_body");
}

#[actix_web::test]
async fn malformed_path_ids_are_bad_requests() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_as(&app, "admin").await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/category/own/not-a-uuid")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_uuid");
}

#[actix_web::test]
async fn update_requires_matching_path_and_body_ids() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_as(&app, "admin").await;
    let created = create_category(&app, &cookie, json!({ "name": "Work" })).await;
    let id = created["id"].as_str().expect("id");

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/category/own/{id}"))
        .cookie(cookie)
        .set_json(json!({ "id": Uuid::new_v4(), "name": "Renamed" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "id_mismatch");
}

#[actix_web::test]
async fn update_keeps_children_and_returns_stored_state() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_as(&app, "admin").await;
    let created = create_category(
        &app,
        &cookie,
        json!({ "name": "Work", "tasks": [{ "name": "Report" }] }),
    )
    .await;
    let id = created["id"].as_str().expect("id");

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/category/own/{id}"))
        .cookie(cookie)
        .set_json(json!({ "id": id, "name": "Deep work" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["name"], "Deep work");
    assert_eq!(body["tasks"].as_array().map(Vec::len), Some(1));
}

// Known asymmetry: updating someone else's entity is a 400, not a 403.
#[actix_web::test]
async fn update_of_foreign_entity_is_a_bad_request() {
    let app = actix_test::init_service(test_app()).await;
    let admin = login_as(&app, "admin").await;
    let guest = login_as(&app, "guest").await;
    let created = create_category(&app, &admin, json!({ "name": "Work" })).await;
    let id = created["id"].as_str().expect("id");

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/category/own/{id}"))
        .cookie(guest)
        .set_json(json!({ "id": id, "name": "Stolen" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], NOT_OWNED_MESSAGE);
}

#[actix_web::test]
async fn delete_then_read_is_not_found() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_as(&app, "admin").await;
    let created = create_category(&app, &cookie, json!({ "name": "Work" })).await;
    let uri = format!("/api/v1/category/own/{}", created["id"].as_str().expect("id"));

    let delete = actix_test::TestRequest::delete()
        .uri(&uri)
        .cookie(cookie.clone())
        .to_request();
    let response = actix_test::call_service(&app, delete).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let read = actix_test::TestRequest::get()
        .uri(&uri)
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, read).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(actix_test::read_body(response).await.is_empty());
}

#[actix_web::test]
async fn top_level_task_needs_a_category() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_as(&app, "admin").await;

    let response = post_json(&app, &cookie, "/api/v1/task", json!({ "name": "Orphan" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "categoryId");
}
