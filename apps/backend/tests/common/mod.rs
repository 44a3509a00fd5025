#![allow(dead_code)]


use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use backend_test_support::problem_details::{
    assert_problem_details_from_service_response, ProblemDetailsLike,
};
use turnstile_backend::db::txn_policy::{set_txn_policy, TxnPolicy};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Each test owns a private database, so writes are committed.
// The rollback policy has its own binary (db_txn_tests).
#[ctor::ctor]
fn init_txn_policy() {
    set_txn_policy(TxnPolicy::CommitOnOk);
}

/// Assert a problem-details response with the given status, code and a
/// detail containing `detail_contains`.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    detail_contains: &str,
) -> ProblemDetailsLike {
    assert_problem_details_from_service_response(
        resp,
        expected_code,
        StatusCode::from_u16(expected_status).expect("valid status code"),
        Some(detail_contains),
    )
    .await
}
