//! Tests for users API handlers.

use super::*;
use crate::domain::TRACE_ID_HEADER;
use crate::inbound::http::validation::{json_config, query_config};
use crate::middleware::Trace;
use crate::outbound::memory::InMemoryUserRepository;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::new()));
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .configure(configure)
}

fn ada() -> Value {
    json!({ "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com" })
}

async fn post_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    body: &Value,
) -> (StatusCode, Value) {
    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let value: Value = actix_test::read_body_json(response).await;
    (status, value)
}

async fn send(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_record_in_snake_case() {
    let app = actix_test::init_service(test_app()).await;

    let (status, body) = post_user(&app, &ada()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "id": 1, "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com" })
    );
}

#[rstest]
#[actix_web::test]
async fn duplicate_create_is_a_conflict() {
    let app = actix_test::init_service(test_app()).await;
    post_user(&app, &ada()).await;

    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "first_name": "Augusta", "last_name": "King", "email": "ada@example.com" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "User already exists");
    assert!(body["trace_id"].is_string());
}

#[rstest]
#[case(json!({ "last_name": "Lovelace", "email": "ada@example.com" }), "first_name", "missing_field")]
#[case(json!({ "first_name": "Ada", "email": "ada@example.com" }), "last_name", "missing_field")]
#[case(json!({ "first_name": "Ada", "last_name": "Lovelace" }), "email", "missing_field")]
#[case(json!({ "first_name": "Ada", "last_name": "Lovelace", "email": "ada" }), "email", "invalid_email")]
#[actix_web::test]
async fn create_rejects_invalid_shapes(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app()).await;

    let (status, body) = post_user(&app, &payload).await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body["code"], "shape_invalid");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn malformed_body_is_not_acceptable() {
    let app = actix_test::init_service(test_app()).await;
    let request = actix_test::TestRequest::post()
        .uri("/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json");

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body["details"]["code"], "invalid_body");
}

#[rstest]
#[actix_web::test]
async fn list_applies_default_paging() {
    let app = actix_test::init_service(test_app()).await;
    for n in 0..7 {
        let payload = json!({
            "first_name": format!("User{n}"),
            "last_name": "Tester",
            "email": format!("user{n}@example.com"),
        });
        post_user(&app, &payload).await;
    }

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/users")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["number"], 0);
    assert_eq!(body["size"], 5);
    assert_eq!(body["total_elements"], 7);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["first"], true);
    assert_eq!(body["last"], false);
    assert_eq!(body["content"][0]["first_name"], "User0");
}

#[rstest]
#[case("/users?page=-1", "page")]
#[case("/users?size=0", "size")]
#[actix_web::test]
async fn list_rejects_invalid_paging(#[case] uri: &str, #[case] field: &str) {
    let app = actix_test::init_service(test_app()).await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn non_numeric_paging_is_not_acceptable() {
    let app = actix_test::init_service(test_app()).await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/users?page=abc")).await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body["details"]["code"], "invalid_query");
}

#[rstest]
#[case("first_name")]
#[case("firstName")]
#[actix_web::test]
async fn search_matches_exact_first_name(#[case] parameter: &str) {
    let app = actix_test::init_service(test_app()).await;
    post_user(&app, &ada()).await;
    post_user(
        &app,
        &json!({ "first_name": "Grace", "last_name": "Hopper", "email": "grace@example.com" }),
    )
    .await;

    let uri = format!("/users/search?{parameter}=Ada");
    let (status, body) = send(&app, actix_test::TestRequest::get().uri(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_elements"], 1);
    assert_eq!(body["content"][0]["email"], "ada@example.com");
}

#[rstest]
#[actix_web::test]
async fn search_without_matches_returns_empty_page() {
    let app = actix_test::init_service(test_app()).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::get().uri("/users/search?first_name=Nobody"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["empty"], true);
    assert_eq!(body["total_elements"], 0);
}

#[rstest]
#[case("/users/search")]
#[case("/users/search?first_name=")]
#[actix_web::test]
async fn search_requires_a_name(#[case] uri: &str) {
    let app = actix_test::init_service(test_app()).await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body["code"], "missing_input");
    assert_eq!(body["message"], "Name can not be null or empty");
}

#[rstest]
#[actix_web::test]
async fn update_overwrites_names_and_adopts_new_email() {
    let app = actix_test::init_service(test_app()).await;
    post_user(&app, &ada()).await;

    let request = actix_test::TestRequest::put()
        .uri("/users/1")
        .set_json(json!({ "first_name": "Augusta", "last_name": "King", "email": "augusta@example.com" }));
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": 1, "first_name": "Augusta", "last_name": "King", "email": "augusta@example.com" })
    );
}

#[rstest]
#[actix_web::test]
async fn update_to_taken_email_is_a_conflict() {
    let app = actix_test::init_service(test_app()).await;
    post_user(&app, &ada()).await;
    post_user(
        &app,
        &json!({ "first_name": "Grace", "last_name": "Hopper", "email": "grace@example.com" }),
    )
    .await;

    let request = actix_test::TestRequest::put()
        .uri("/users/2")
        .set_json(ada());
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "User with this email already exists");
}

#[rstest]
#[case("/users/99", StatusCode::NOT_FOUND, "not_found")]
#[case("/users/abc", StatusCode::NOT_ACCEPTABLE, "shape_invalid")]
#[actix_web::test]
async fn update_reports_unknown_or_malformed_ids(
    #[case] uri: &str,
    #[case] expected: StatusCode,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::put().uri(uri).set_json(ada());
    let (status, body) = send(&app, request).await;

    assert_eq!(status, expected);
    assert_eq!(body["code"], code);
}

#[rstest]
#[actix_web::test]
async fn delete_confirms_then_reports_not_found() {
    let app = actix_test::init_service(test_app()).await;
    post_user(&app, &ada()).await;

    let request = actix_test::TestRequest::delete().uri("/users/1").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = actix_test::read_body(response).await;
    assert_eq!(body.as_ref(), b"Successful deleted user 1");

    let (status, body) = send(&app, actix_test::TestRequest::delete().uri("/users/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "User not found. Maybe you entered wrong or negative id?"
    );
}

#[rstest]
fn user_request_converts_into_draft() {
    let draft = UserDraft::try_from(UserRequest {
        first_name: Some("Ada".to_owned()),
        last_name: Some("Lovelace".to_owned()),
        email: Some("ada@example.com".to_owned()),
    })
    .expect("valid request");

    assert_eq!(draft.first_name.to_string(), "Ada");
    assert_eq!(
        draft.email.map(|email| email.to_string()),
        Some("ada@example.com".to_owned())
    );
}
