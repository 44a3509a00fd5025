use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;
use turnstile_backend::routes::dto::{LinkResponse, ModuleResponse, ModuleWithTurnResponse};
use turnstile_backend::AppError;

use crate::common::assert_problem;
use crate::support::app_builder::create_test_app;
use crate::support::factory::{install_claim_thief, seed_module, seed_turns, seed_turns_at};
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn create_with_and_without_name() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post().uri("/module").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: ModuleResponse = test::read_body_json(resp).await;
    assert_eq!(created.name, "MOD-1");

    let req = test::TestRequest::post()
        .uri("/module")
        .set_json(json!({ "name": "Window 2" }))
        .to_request();
    let named: ModuleResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(named.name, "Window 2");

    let req = test::TestRequest::post()
        .uri("/module")
        .set_json(json!({ "name": "Window 2" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 409, "UNIQUE_NAME", "Window 2").await;

    let req = test::TestRequest::get().uri("/module").to_request();
    let all: Vec<ModuleResponse> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 2);
    Ok(())
}

#[actix_web::test]
async fn switch_turn_allocates_in_order_then_exhausts() -> Result<(), AppError> {
    let state = build_test_state().await?;
    seed_turns(turnstile_backend::db::require_db(&state)?, 2).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post().uri("/module").to_request();
    let module: ModuleResponse = test::call_and_read_body_json(&app, req).await;
    let switch = format!("/module/switchTurn/{}", module.id);

    let req = test::TestRequest::post().uri(&switch).to_request();
    let first: LinkResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(first.module_id, module.id);
    assert_eq!(first.turn.as_ref().map(|t| t.turn.as_str()), Some("TRN-1"));
    assert_eq!(first.turn.as_ref().map(|t| t.used), Some(true));

    let req = test::TestRequest::post().uri(&switch).to_request();
    let second: LinkResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second.turn.map(|t| t.turn).as_deref(), Some("TRN-2"));

    let req = test::TestRequest::post().uri(&switch).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 404, "NO_TURN_AVAILABLE", "No turn available").await;

    let req = test::TestRequest::get()
        .uri(&format!("/module/{}/turn", module.id))
        .to_request();
    let current: LinkResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(current.turn_id, second.turn_id);
    Ok(())
}

#[actix_web::test]
async fn switch_turn_rejects_bad_and_unknown_ids() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    for bad in ["abc", "0", "-1"] {
        let req = test::TestRequest::post()
            .uri(&format!("/module/switchTurn/{bad}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, 400, "INVALID_ID", bad).await;
    }

    let req = test::TestRequest::post()
        .uri("/module/switchTurn/77")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 404, "MODULE_NOT_FOUND", "77").await;
    Ok(())
}

#[actix_web::test]
async fn find_update_delete_and_resets() -> Result<(), AppError> {
    let state = build_test_state().await?;
    seed_turns(turnstile_backend::db::require_db(&state)?, 1).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post().uri("/module").to_request();
    let module: ModuleResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get().uri("/module/MOD-1").to_request();
    let by_name: ModuleResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(by_name.id, module.id);

    let req = test::TestRequest::patch()
        .uri(&format!("/module/{}", module.id))
        .set_json(json!({ "name": "Counter" }))
        .to_request();
    let renamed: ModuleResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(renamed.name, "Counter");

    let req = test::TestRequest::post()
        .uri(&format!("/module/switchTurn/{}", module.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/module/withTurn").to_request();
    let rows: Vec<ModuleWithTurnResponse> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].module.name, "Counter");
    assert_eq!(rows[0].turn.as_ref().map(|t| t.turn.as_str()), Some("TRN-1"));

    let req = test::TestRequest::delete().uri("/module/withTurn/reset").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/module/{}/turn", module.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 404, "LINK_NOT_FOUND", "holds no turn").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/module/{}", module.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/module/{}", module.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 404, "MODULE_NOT_FOUND", "not found").await;

    let req = test::TestRequest::post().uri("/module").to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::delete().uri("/module/reset").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/module").to_request();
    let all: Vec<ModuleResponse> = test::call_and_read_body_json(&app, req).await;
    assert!(all.is_empty());
    Ok(())
}

#[actix_web::test]
async fn switch_turn_reports_allocation_race_when_budget_runs_out() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = turnstile_backend::db::require_db(&state)?;
    seed_turns_at(db, &[("STOLEN-1", 0), ("TRN-2", 10)]).await?;
    let module = seed_module(db, "unlucky").await?;
    install_claim_thief(db, true).await?;

    let app = create_test_app(state.clone())
        .with_prod_routes()
        .with_max_claim_attempts(1)
        .build()
        .await;

    let uri = format!("/module/switchTurn/{}", module.id);
    let req = test::TestRequest::post().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 409, "ALLOCATION_RACE", "retry").await;

    // The stolen turn is gone, so the next request wins the second one
    let req = test::TestRequest::post().uri(&uri).to_request();
    let link: LinkResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(link.turn.map(|t| t.turn).as_deref(), Some("TRN-2"));
    Ok(())
}
