//! `/module` routes: work-station CRUD and turn allocation.

use actix_web::{web, HttpRequest, HttpResponse};

use super::dto::{LinkResponse, ModuleInput, ModuleResponse, ModuleWithTurnResponse};
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{Lookup, RecordId, ValidatedJson};
use crate::services::{AssignmentService, ModuleService};
use crate::state::app_state::AppState;

/// POST /module
async fn create_module(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<ModuleInput>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name();

    let module = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ModuleService::new()
                .create(txn, name)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(ModuleResponse::from(module)))
}

/// GET /module
async fn list_modules(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let modules = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { ModuleService::new().list(txn).await.map_err(AppError::from) })
    })
    .await?;

    let body: Vec<ModuleResponse> = modules.into_iter().map(ModuleResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /module/withTurn
async fn list_modules_with_turn(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let rows = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            ModuleService::new()
                .list_with_turn(txn)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let body: Vec<ModuleWithTurnResponse> =
        rows.into_iter().map(ModuleWithTurnResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// DELETE /module/withTurn/reset
async fn reset_links(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            ModuleService::new()
                .remove_all_links(txn)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /module/switchTurn/{id}
///
/// Hands the module the oldest available turn, retiring the one it held.
/// The claim retry budget comes from the `AssignmentService` registered as
/// app data, falling back to the default.
async fn switch_turn(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    module_id: RecordId,
) -> Result<HttpResponse, AppError> {
    let module_id = module_id.get();
    let assignment = req
        .app_data::<AssignmentService>()
        .copied()
        .unwrap_or_default();

    let link = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            assignment
                .allocate_next_turn(txn, module_id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(LinkResponse::from(link)))
}

/// DELETE /module/reset
async fn reset_modules(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            ModuleService::new()
                .remove_all(txn)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /module/{id}/turn
async fn current_turn(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    module_id: RecordId,
) -> Result<HttpResponse, AppError> {
    let module_id = module_id.get();

    let link = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ModuleService::new()
                .current_turn(txn, module_id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(LinkResponse::from(link)))
}

/// GET /module/{id} where `{id}` is a numeric id or a module name
async fn find_module(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    key: Lookup,
) -> Result<HttpResponse, AppError> {
    let key = key.into_inner();

    let module = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ModuleService::new()
                .find(txn, &key)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(ModuleResponse::from(module)))
}

/// PATCH /module/{id}
async fn update_module(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    module_id: RecordId,
    body: ValidatedJson<ModuleInput>,
) -> Result<HttpResponse, AppError> {
    let module_id = module_id.get();
    let name = body.into_inner().name();

    let module = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ModuleService::new()
                .update(txn, module_id, name)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(ModuleResponse::from(module)))
}

/// DELETE /module/{id}
async fn remove_module(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    module_id: RecordId,
) -> Result<HttpResponse, AppError> {
    let module_id = module_id.get();

    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ModuleService::new()
                .remove(txn, module_id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Fixed segments are registered before `/{id}` so they are not read as
/// module names.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_module))
            .route(web::get().to(list_modules)),
    )
    .service(web::resource("/withTurn").route(web::get().to(list_modules_with_turn)))
    .service(web::resource("/withTurn/reset").route(web::delete().to(reset_links)))
    .service(web::resource("/switchTurn/{id}").route(web::post().to(switch_turn)))
    .service(web::resource("/reset").route(web::delete().to(reset_modules)))
    .service(web::resource("/{id}/turn").route(web::get().to(current_turn)))
    .service(
        web::resource("/{id}")
            .route(web::get().to(find_module))
            .route(web::patch().to(update_module))
            .route(web::delete().to(remove_module)),
    );
}
