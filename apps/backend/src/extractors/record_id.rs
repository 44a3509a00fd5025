use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Positive numeric id taken from the `{id}` path segment.
///
/// Anything else (missing, non-numeric, zero, negative) is rejected with
/// `400 INVALID_ID` before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn get(self) -> i64 {
        self.0
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(RecordId(id)),
            _ => Err(AppError::invalid_id(raw)),
        }
    }
}

impl FromRequest for RecordId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = match req.match_info().get("id") {
            Some(raw) => RecordId::parse(raw),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidId,
                "Missing id path parameter",
            )),
        };
        ready(parsed)
    }
}
