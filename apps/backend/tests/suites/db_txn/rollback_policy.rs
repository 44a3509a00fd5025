use turnstile_backend::db::require_db;
use turnstile_backend::db::txn::with_txn;
use turnstile_backend::db::txn_policy::{current, TxnPolicy};
use turnstile_backend::repos::turns;
use turnstile_backend::services::{AssignmentService, TurnService};
use turnstile_backend::AppError;

use crate::support::factory::{link_rows_for_module, reload_turn, seed_module, seed_turns};
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn successful_closure_is_rolled_back() -> Result<(), AppError> {
    assert_eq!(current(), TxnPolicy::RollbackOnOk);
    let state = build_test_state().await?;

    let created = with_txn(None, &state, |txn| {
        Box::pin(async move { Ok(TurnService::new().create(txn).await?) })
    })
    .await?;
    assert_eq!(created.label, "TRN-1");

    assert_eq!(turns::count(require_db(&state)?).await?, 0);
    Ok(())
}

#[tokio::test]
async fn allocation_is_discarded_with_the_transaction() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let turn = seed_turns(db, 1).await?.remove(0);
    let module_id = seed_module(db, "M").await?.id;

    let link = with_txn(None, &state, move |txn| {
        Box::pin(async move {
            Ok(AssignmentService::new()
                .allocate_next_turn(txn, module_id)
                .await?)
        })
    })
    .await?;
    assert_eq!(link.turn_id, turn.id);

    assert!(!reload_turn(db, turn.id).await.used);
    assert_eq!(link_rows_for_module(db, module_id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn error_is_returned_unchanged() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = with_txn(None, &state, |_txn| {
        Box::pin(async move { Err::<(), _>(AppError::internal("boom")) })
    })
    .await
    .unwrap_err();

    assert_eq!(err.detail(), "boom");
    Ok(())
}
