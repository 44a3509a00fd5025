use actix_web::{test, web, HttpResponse};
use turnstile_backend::state::app_state::AppState;
use turnstile_backend::{AppError, ErrorCode};

use crate::common::assert_problem;
use crate::support::app_builder::create_test_app;

async fn conflict() -> Result<HttpResponse, AppError> {
    Err(AppError::conflict(
        ErrorCode::AllocationRace,
        "Concurrent allocations claimed every candidate turn; retry",
    ))
}

async fn unavailable() -> Result<HttpResponse, AppError> {
    Err(AppError::db_unavailable())
}

async fn timeout() -> Result<HttpResponse, AppError> {
    Err(AppError::from(
        turnstile_backend::errors::domain::DomainError::infra(
            turnstile_backend::errors::domain::InfraErrorKind::Timeout,
            "Database timeout",
        ),
    ))
}

async fn invalid() -> Result<HttpResponse, AppError> {
    Err(AppError::invalid(ErrorCode::ValidationError, "Field validation failed"))
}

fn error_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/conflict", web::get().to(conflict))
        .route("/unavailable", web::get().to(unavailable))
        .route("/timeout", web::get().to(timeout))
        .route("/invalid", web::get().to(invalid));
}

// handler-only: validates error shape; no DB
#[actix_web::test]
async fn every_error_renders_problem_details() {
    let app = create_test_app(AppState::without_db())
        .with_routes(error_routes)
        .build()
        .await;

    let cases = [
        ("/conflict", 409, "ALLOCATION_RACE", "retry"),
        ("/unavailable", 503, "DB_UNAVAILABLE", "Database unavailable"),
        ("/timeout", 504, "DB_TIMEOUT", "Database timeout"),
        ("/invalid", 422, "VALIDATION_ERROR", "Field validation failed"),
    ];

    for (uri, status, code, detail) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let problem = assert_problem(resp, status, code, detail).await;
        assert!(problem.type_.starts_with("https://turnstile.app/errors/"));
        assert!(!problem.title.is_empty());
    }
}

#[actix_web::test]
async fn routes_without_database_are_unavailable() {
    let app = create_test_app(AppState::without_db())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/module").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 503, "DB_UNAVAILABLE", "Database unavailable").await;
}

#[actix_web::test]
async fn malformed_and_oversized_bodies() {
    let app = create_test_app(AppState::without_db())
        .with_prod_routes()
        .with_json_limit(32)
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/module")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 400, "BAD_REQUEST", "Invalid JSON").await;

    let req = test::TestRequest::post()
        .uri("/module")
        .insert_header(("content-type", "application/json"))
        .set_payload(format!("{{\"name\": \"{}\"}}", "x".repeat(64)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 413, "PAYLOAD_TOO_LARGE", "32 bytes").await;
}
