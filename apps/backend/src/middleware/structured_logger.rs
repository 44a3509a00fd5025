//! Access log: one `request_completed` event per request.
//!
//! 5xx logs at error, 4xx at warn, everything else at info. The route is
//! the matched pattern so ids do not explode log cardinality.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::web::trace_ctx;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let line = CompletionLine {
            method: req.method().to_string(),
            route: req
                .match_pattern()
                .unwrap_or_else(|| req.path().to_string()),
            trace_id: trace_ctx::trace_id(),
            started: Instant::now(),
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            line.emit(status);
            result
        })
    }
}

/// Fields captured before the handler runs, logged once it settles.
struct CompletionLine {
    method: String,
    /// Matched route pattern (`/module/switchTurn/{id}`), else the raw path
    route: String,
    trace_id: String,
    started: Instant,
}

impl CompletionLine {
    fn emit(&self, status: StatusCode) {
        let code = status.as_u16();
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1_000.0;
        let (method, route, trace_id) = (&self.method, &self.route, &self.trace_id);

        match code {
            500.. => {
                error!(%method, %route, status = code, elapsed_ms, %trace_id, "request_completed")
            }
            400..=499 => {
                warn!(%method, %route, status = code, elapsed_ms, %trace_id, "request_completed")
            }
            _ => info!(%method, %route, status = code, elapsed_ms, %trace_id, "request_completed"),
        }
    }
}
