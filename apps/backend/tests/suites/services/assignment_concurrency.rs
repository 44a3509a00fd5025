use std::collections::HashSet;

use futures_util::future::join_all;
use turnstile_backend::db::require_db;
use turnstile_backend::db::txn::with_txn;
use turnstile_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use turnstile_backend::repos::{module_turns, turns};
use turnstile_backend::services::AssignmentService;
use turnstile_backend::{AppError, AppState};

use crate::support::factory::{
    install_claim_thief, link_rows_for_module, reload_turn, seed_module, seed_modules, seed_turns,
    seed_turns_at,
};
use crate::support::test_state::{build_sqlite_file_state, build_test_state};

/// Allocate in its own transaction, keeping the domain error for assertions.
/// A domain error is returned inside `Ok`, so whatever the attempt wrote
/// before failing is committed.
async fn allocate_with(
    state: &AppState,
    service: AssignmentService,
    module_id: i64,
) -> Result<Result<module_turns::Link, DomainError>, AppError> {
    with_txn(None, state, move |txn| {
        Box::pin(async move { Ok(service.allocate_next_turn(txn, module_id).await) })
    })
    .await
}

async fn allocate(state: &AppState, module_id: i64) -> Result<i64, AppError> {
    with_txn(None, state, move |txn| {
        Box::pin(async move {
            let link = AssignmentService::new()
                .allocate_next_turn(txn, module_id)
                .await?;
            Ok(link.turn_id)
        })
    })
    .await
}

// Interleaving needs more than one connection: these run on file-backed
// SQLite whatever TURNSTILE_TEST_DB_KIND says.

#[tokio::test]
async fn concurrent_allocations_never_share_a_turn() -> Result<(), AppError> {
    let state = build_sqlite_file_state().await?;
    let db = require_db(&state)?;
    seed_turns(db, 8).await?;
    let modules = seed_modules(db, 8).await?;

    let results = join_all(modules.iter().map(|m| allocate(&state, m.id))).await;

    // Lock contention must not surface as an error
    let claimed: Vec<i64> = results.into_iter().collect::<Result<_, _>>()?;
    let distinct: HashSet<i64> = claimed.iter().copied().collect();
    assert_eq!(distinct.len(), claimed.len(), "a turn was handed out twice");

    for module in &modules {
        assert_eq!(link_rows_for_module(db, module.id).await?, 1);
    }
    assert!(turns::list(db, Some(false)).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn oversubscribed_allocations_fail_cleanly() -> Result<(), AppError> {
    let state = build_sqlite_file_state().await?;
    let db = require_db(&state)?;
    seed_turns(db, 3).await?;
    let modules = seed_modules(db, 5).await?;

    let results = join_all(
        modules
            .iter()
            .map(|m| allocate_with(&state, AssignmentService::new(), m.id)),
    )
    .await;

    let mut won = HashSet::new();
    let mut exhausted = 0;
    for result in results {
        match result? {
            Ok(link) => assert!(won.insert(link.turn_id), "turn {} reused", link.turn_id),
            Err(DomainError::NotFound(NotFoundKind::NoTurnAvailable, _)) => exhausted += 1,
            Err(other) => panic!("unexpected allocation error: {other}"),
        }
    }

    assert_eq!(won.len(), 3);
    assert_eq!(exhausted, 2);
    Ok(())
}

#[tokio::test]
async fn repeated_allocations_for_one_module_keep_a_single_link() -> Result<(), AppError> {
    let state = build_sqlite_file_state().await?;
    let db = require_db(&state)?;
    seed_turns(db, 6).await?;
    let module_id = seed_modules(db, 1).await?[0].id;

    let results = join_all((0..4).map(|_| allocate(&state, module_id))).await;
    let claimed: Vec<i64> = results.into_iter().collect::<Result<_, _>>()?;
    assert_eq!(claimed.iter().copied().collect::<HashSet<_>>().len(), 4);

    assert_eq!(link_rows_for_module(db, module_id).await?, 1);
    // Every allocated turn is retired or currently held
    assert_eq!(turns::list(db, Some(false)).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn lost_claim_moves_on_to_next_candidate() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let seeded = seed_turns_at(db, &[("STOLEN-1", 0), ("TRN-2", 10)]).await?;
    let module = seed_module(db, "unlucky").await?;
    install_claim_thief(db, true).await?;

    let link = allocate_with(&state, AssignmentService::new(), module.id).await??;

    assert_eq!(link.turn_id, seeded[1].id);
    // The stolen turn went to someone else, not to this module
    assert!(reload_turn(db, seeded[0].id).await.used);
    assert!(module_turns::list_by_turn(db, seeded[0].id).await?.is_empty());
    assert_eq!(link_rows_for_module(db, module.id).await?, 1);
    Ok(())
}

#[tokio::test]
async fn every_lost_claim_spends_an_attempt() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let seeded = seed_turns_at(db, &[("STOLEN-1", 0), ("STOLEN-2", 10), ("TRN-3", 20)]).await?;
    let module_id = seed_module(db, "budget").await?.id;
    install_claim_thief(db, true).await?;

    // Two attempts, two thefts
    let result = with_txn(None, &state, move |txn| {
        Box::pin(async move {
            AssignmentService::new()
                .with_max_claim_attempts(2)
                .allocate_next_turn(txn, module_id)
                .await?;
            Ok(())
        })
    })
    .await;
    let err = result.expect_err("two attempts cannot reach the third turn");
    assert_eq!(err.code().as_str(), "ALLOCATION_RACE");
    assert_eq!(err.status().as_u16(), 409);

    // The failed transaction rolled the thefts back as well
    assert!(!reload_turn(db, seeded[0].id).await.used);
    assert_eq!(link_rows_for_module(db, module_id).await?, 0);

    let service = AssignmentService::new().with_max_claim_attempts(3);
    let link = allocate_with(&state, service, module_id).await??;
    assert_eq!(link.turn_id, seeded[2].id);
    Ok(())
}

#[tokio::test]
async fn unwinnable_candidate_exhausts_the_budget() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let seeded = seed_turns_at(db, &[("STOLEN-1", 0), ("TRN-2", 10)]).await?;
    let module = seed_module(db, "stuck").await?;
    // The turn stays available, so every attempt picks it again
    install_claim_thief(db, false).await?;

    let result = allocate_with(&state, AssignmentService::new(), module.id).await?;

    assert!(
        matches!(
            result,
            Err(DomainError::Conflict(ConflictKind::AllocationRace, _))
        ),
        "{result:?}"
    );
    assert!(!reload_turn(db, seeded[0].id).await.used);
    assert!(!reload_turn(db, seeded[1].id).await.used);
    assert_eq!(link_rows_for_module(db, module.id).await?, 0);
    Ok(())
}
