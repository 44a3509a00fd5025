//! Assertions for the backend's `application/problem+json` error bodies.
//!
//! The body is mirrored locally so this crate does not depend on the
//! backend; a drift in field names shows up as a deserialization failure.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE};
use actix_web::http::StatusCode;
use serde::Deserialize;

const PROBLEM_JSON: &str = "application/problem+json";
const TRACE_HEADER: &str = "x-trace-id";

/// Deserialized problem-details body
#[derive(Debug, Deserialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

impl ProblemDetailsLike {
    /// Parse a body, checking the content type and that the trace id in
    /// the body is the one echoed in `x-trace-id`.
    pub fn parse(headers: &HeaderMap, body: &[u8]) -> Self {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(content_type, PROBLEM_JSON, "unexpected content type");

        let problem: Self = serde_json::from_slice(body).unwrap_or_else(|e| {
            panic!(
                "body is not problem details ({e}): {}",
                String::from_utf8_lossy(body)
            )
        });

        let header = headers
            .get(TRACE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_else(|| panic!("{TRACE_HEADER} header missing or not UTF-8"));
        assert_eq!(problem.trace_id, header, "body trace_id differs from header");

        problem
    }

    /// Check code, status and (optionally) a detail fragment.
    pub fn expect(&self, code: &str, status: StatusCode, detail_contains: Option<&str>) {
        assert_eq!(self.code, code, "error code (detail: {})", self.detail);
        assert_eq!(self.status, status.as_u16(), "status field in body");
        assert!(
            self.type_.ends_with(code),
            "type '{}' should end with '{code}'",
            self.type_
        );
        if let Some(fragment) = detail_contains {
            assert!(
                self.detail.contains(fragment),
                "detail '{}' should contain '{fragment}'",
                self.detail
            );
        }
    }
}

/// Assert on already-split response parts.
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    assert_eq!(status, expected_status, "HTTP status");
    let problem = ProblemDetailsLike::parse(headers, body_bytes);
    problem.expect(expected_code, expected_status, expected_detail_contains);
    problem
}

/// Consume a test response and assert it is the expected problem.
pub async fn assert_problem_details_from_service_response(
    resp: ServiceResponse<BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        expected_status,
        expected_detail_contains,
    )
}
