//! Property tests for allocation order, link uniqueness and retirement.

use proptest::prelude::*;
use turnstile_backend::db::require_db;
use turnstile_backend::db::txn::with_txn;
use turnstile_backend::errors::domain::{DomainError, NotFoundKind};
use turnstile_backend::repos::{module_turns, turns};
use turnstile_backend::services::AssignmentService;
use turnstile_backend::AppError;

use crate::common::proptest_prelude::proptest_prelude_config;
use crate::support::factory::{link_rows_for_module, seed_modules, seed_turns};
use crate::support::test_state::build_test_state;

/// Outcome of replaying a sequence of allocations.
struct Replay {
    turn_ids: Vec<i64>,
    /// Turn id each allocation received, `None` once exhausted
    allocations: Vec<(usize, Option<i64>)>,
    /// Link rows per module after the run, with the linked turn id
    links: Vec<(u64, Option<i64>)>,
    used: Vec<bool>,
}

async fn replay(n_turns: usize, n_modules: usize, calls: &[usize]) -> Result<Replay, AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let turns_seeded = seed_turns(db, n_turns).await?;
    let modules = seed_modules(db, n_modules).await?;

    let mut allocations = Vec::with_capacity(calls.len());
    for &pick in calls {
        let module_id = modules[pick % n_modules].id;
        let outcome = with_txn(None, &state, move |txn| {
            Box::pin(async move {
                Ok(AssignmentService::new()
                    .allocate_next_turn(txn, module_id)
                    .await)
            })
        })
        .await?;

        match outcome {
            Ok(link) => allocations.push((pick % n_modules, Some(link.turn_id))),
            Err(DomainError::NotFound(NotFoundKind::NoTurnAvailable, _)) => {
                allocations.push((pick % n_modules, None))
            }
            Err(other) => return Err(other.into()),
        }
    }

    let mut links = Vec::with_capacity(n_modules);
    for module in &modules {
        let rows = link_rows_for_module(db, module.id).await?;
        let current = module_turns::find_by_module_with_turn(db, module.id)
            .await?
            .map(|l| l.turn_id);
        links.push((rows, current));
    }

    let mut used = Vec::with_capacity(n_turns);
    for turn in &turns_seeded {
        let reloaded = turns::find_by_id(db, turn.id).await?;
        used.push(reloaded.map(|t| t.used).unwrap_or(false));
    }

    Ok(Replay {
        turn_ids: turns_seeded.iter().map(|t| t.id).collect(),
        allocations,
        links,
        used,
    })
}

fn run(n_turns: usize, n_modules: usize, calls: &[usize]) -> Replay {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
        .block_on(replay(n_turns, n_modules, calls))
        .expect("replay")
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    /// Allocations hand out turns in creation order, whichever module asks,
    /// then fail with NoTurnAvailable.
    #[test]
    fn turns_are_consumed_in_creation_order(
        n_turns in 0usize..6,
        n_modules in 1usize..4,
        calls in prop::collection::vec(0usize..8, 0..10),
    ) {
        let r = run(n_turns, n_modules, &calls);

        let handed_out: Vec<i64> = r.allocations.iter().filter_map(|(_, t)| *t).collect();
        let expected: Vec<i64> = r.turn_ids.iter().copied().take(calls.len()).collect();
        prop_assert_eq!(&handed_out, &expected);

        for (i, (_, turn)) in r.allocations.iter().enumerate() {
            prop_assert_eq!(turn.is_none(), i >= n_turns);
        }
    }

    /// Each module holds at most one link, pointing at its latest allocation;
    /// every handed-out turn is used.
    #[test]
    fn single_link_and_retirement(
        n_turns in 1usize..6,
        n_modules in 1usize..4,
        calls in prop::collection::vec(0usize..8, 1..10),
    ) {
        let r = run(n_turns, n_modules, &calls);

        for module_idx in 0..n_modules {
            let latest = r
                .allocations
                .iter()
                .filter(|(m, t)| *m == module_idx && t.is_some())
                .last()
                .and_then(|(_, t)| *t);
            let (rows, current) = r.links[module_idx];
            prop_assert_eq!(rows, u64::from(latest.is_some()));
            prop_assert_eq!(current, latest);
        }

        let allocated = r.allocations.iter().filter(|(_, t)| t.is_some()).count();
        for (i, used) in r.used.iter().enumerate() {
            prop_assert_eq!(*used, i < allocated);
        }
    }
}
