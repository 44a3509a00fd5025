use actix_web::error::QueryPayloadError;
use actix_web::{web, HttpRequest};
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// `QueryConfig` whose parse failures render as `400 INVALID_QUERY`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, query = %req.query_string(), "query string rejected");
    AppError::bad_request(
        ErrorCode::InvalidQuery,
        format!("Invalid query string: {err}"),
    )
    .into()
}
