use std::convert::Infallible;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::LookupKey;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// `{id}` path segment read as a numeric id or a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup(pub LookupKey);

impl Lookup {
    pub fn into_inner(self) -> LookupKey {
        self.0
    }
}

impl FromRequest for Lookup {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = match req.match_info().get("id") {
            Some(raw) => {
                let key = raw
                    .parse::<LookupKey>()
                    .unwrap_or_else(|never: Infallible| match never {});
                Ok(Lookup(key))
            }
            None => Err(AppError::bad_request(
                ErrorCode::InvalidId,
                "Missing lookup path parameter",
            )),
        };
        ready(parsed)
    }
}
