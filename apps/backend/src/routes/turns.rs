//! `/turn` routes: ticket CRUD and the used toggle.

use actix_web::{web, HttpRequest, HttpResponse};

use super::dto::{TurnResponse, UsedQuery};
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{Lookup, RecordId};
use crate::services::TurnService;
use crate::state::app_state::AppState;

/// POST /turn
async fn create_turn(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let turn = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { TurnService::new().create(txn).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Created().json(TurnResponse::from(turn)))
}

/// GET /turn?used=
async fn list_turns(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    query: web::Query<UsedQuery>,
) -> Result<HttpResponse, AppError> {
    let used = query.used;

    let turns = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            TurnService::new()
                .list(txn, used)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let body: Vec<TurnResponse> = turns.into_iter().map(TurnResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /turn/switchUsed/{id}?used=
///
/// Without `used` the flag is flipped.
async fn switch_used(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    turn_id: RecordId,
    query: web::Query<UsedQuery>,
) -> Result<HttpResponse, AppError> {
    let turn_id = turn_id.get();
    let used = query.used;

    let turn = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            TurnService::new()
                .toggle_used(txn, turn_id, used)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(TurnResponse::from(turn)))
}

/// DELETE /turn/reset
async fn reset_turns(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            TurnService::new()
                .remove_all(txn)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /turn/{id} where `{id}` is a numeric id or a turn label
async fn find_turn(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    key: Lookup,
) -> Result<HttpResponse, AppError> {
    let key = key.into_inner();

    let turn = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            TurnService::new()
                .find(txn, &key)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(TurnResponse::from(turn)))
}

/// DELETE /turn/{idOrLabel}
async fn remove_turn(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    key: Lookup,
) -> Result<HttpResponse, AppError> {
    let key = key.into_inner();

    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            TurnService::new()
                .remove(txn, &key)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_turn))
            .route(web::get().to(list_turns)),
    )
    .service(web::resource("/switchUsed/{id}").route(web::post().to(switch_used)))
    .service(web::resource("/reset").route(web::delete().to(reset_turns)))
    .service(
        web::resource("/{id}")
            .route(web::get().to(find_turn))
            .route(web::delete().to(remove_turn)),
    );
}
