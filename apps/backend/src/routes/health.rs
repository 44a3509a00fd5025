use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub app_version: String,
    /// `ok` or `error`
    pub db: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_error: Option<String>,
    /// Latest applied migration, `no_migrations`, or `unknown`
    pub migrations: String,
    pub time: String,
}

async fn check_db(db: &DatabaseConnection) -> Result<String, String> {
    db.query_one(Statement::from_string(
        db.get_database_backend(),
        "SELECT 1 AS health_check".to_string(),
    ))
    .await
    .map_err(|e| format!("DB query failed: {e}"))?;

    Ok(match get_latest_migration_version(db).await {
        Ok(Some(version)) => version,
        Ok(None) => "no_migrations".to_string(),
        Err(_) => "unknown".to_string(),
    })
}

/// GET /health
///
/// Always answers 200; database trouble is reported in the body.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let outcome = match require_db(&app_state) {
        Ok(db) => check_db(db).await,
        Err(e) => Err(format!("DB unavailable: {e}")),
    };

    let (db, db_error, migrations) = match outcome {
        Ok(migrations) => ("ok".to_string(), None, migrations),
        Err(detail) => ("error".to_string(), Some(detail), "unknown".to_string()),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        db,
        db_error,
        migrations,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
