use actix_web::test;
use turnstile_backend::routes::health::HealthResponse;
use turnstile_backend::state::app_state::AppState;
use turnstile_backend::AppError;

use crate::support::app_builder::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn reports_database_and_migrations() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let health: HealthResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(health.status, "ok");
    assert_eq!(health.db, "ok");
    assert!(health.db_error.is_none());
    assert!(health.migrations.starts_with("m2025"), "got {}", health.migrations);
    assert_eq!(health.app_version, env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[actix_web::test]
async fn reports_missing_database_without_failing() {
    let app = create_test_app(AppState::without_db())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let health: HealthResponse = test::read_body_json(resp).await;
    assert_eq!(health.db, "error");
    assert!(health
        .db_error
        .as_deref()
        .is_some_and(|e| e.contains("DB unavailable")));
}
