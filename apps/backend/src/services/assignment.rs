//! Turn assignment: hands the oldest unused turn to a module.
//!
//! A module holds at most one link. Allocating retires the module's current
//! turn (marks it used) and links the newly claimed one in its place. All
//! steps run on the caller's transaction, so a failure anywhere leaves
//! neither a claimed turn without a link nor a dangling link.
//!
//! Concurrency: the module row is locked for the transaction (Postgres), the
//! candidate turn is claimed with `UPDATE ... WHERE used = false`, and a
//! lost claim moves on to the next candidate. The unique index on
//! `module_turns.module_id` backstops anything that slips through.

use sea_orm::DatabaseTransaction;
use tracing::{debug, info, warn};

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::module_turns::{self as links, Link};
use crate::repos::turns::{self, Turn};
use crate::repos::modules;
use crate::utils::find_or_fail::find_or_not_found;

/// Claim attempts before giving up with `Conflict(AllocationRace)`
pub const DEFAULT_MAX_CLAIM_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Copy)]
pub struct AssignmentService {
    max_claim_attempts: u32,
}

impl AssignmentService {
    pub fn new() -> Self {
        Self {
            max_claim_attempts: DEFAULT_MAX_CLAIM_ATTEMPTS,
        }
    }

    /// Override the claim retry budget (at least one attempt is always made).
    pub fn with_max_claim_attempts(mut self, attempts: u32) -> Self {
        self.max_claim_attempts = attempts.max(1);
        self
    }

    pub fn max_claim_attempts(&self) -> u32 {
        self.max_claim_attempts
    }

    /// Give `module_id` the oldest available turn.
    ///
    /// Returns the new link with the claimed turn attached.
    ///
    /// Errors:
    /// - `NotFound(Module)` when the module does not exist
    /// - `NotFound(NoTurnAvailable)` when every turn is used
    /// - `Conflict(AllocationRace)` when concurrent allocations won every
    ///   candidate within the retry budget, or raced on the same module
    pub async fn allocate_next_turn(
        &self,
        txn: &DatabaseTransaction,
        module_id: i64,
    ) -> Result<Link, DomainError> {
        find_or_not_found(
            modules::find_by_id_for_update(txn, module_id),
            NotFoundKind::Module,
            format!("Module {module_id} not found"),
        )
        .await?;

        let claimed = self.claim_next_turn(txn, module_id).await?;

        let retired_turn_id = match links::find_by_module_with_turn(txn, module_id).await? {
            None => None,
            Some(previous) => {
                // Re-marking an already used turn is a no-op
                turns::set_used(txn, previous.turn_id, true).await?;
                links::delete_by_module_and_turn(txn, module_id, previous.turn_id).await?;
                Some(previous.turn_id)
            }
        };

        let mut link = links::create(txn, module_id, claimed.id).await?;
        link.turn = Some(claimed);

        info!(
            module_id,
            turn_id = link.turn_id,
            retired_turn_id = ?retired_turn_id,
            "turn allocated"
        );

        Ok(link)
    }

    /// Find the oldest unused turn and flip it to used, moving on to the next
    /// candidate whenever a concurrent allocation claims it first.
    async fn claim_next_turn(
        &self,
        txn: &DatabaseTransaction,
        module_id: i64,
    ) -> Result<Turn, DomainError> {
        for attempt in 1..=self.max_claim_attempts {
            let candidate = find_or_not_found(
                turns::find_next_available(txn),
                NotFoundKind::NoTurnAvailable,
                "No turn available",
            )
            .await?;

            if turns::claim(txn, candidate.id).await? {
                return find_or_not_found(
                    turns::find_by_id(txn, candidate.id),
                    NotFoundKind::Turn,
                    format!("Turn {} vanished after claim", candidate.id),
                )
                .await;
            }

            debug!(
                module_id,
                turn_id = candidate.id,
                attempt,
                "turn claimed concurrently, trying next candidate"
            );
        }

        warn!(
            module_id,
            attempts = self.max_claim_attempts,
            "gave up claiming a turn"
        );
        Err(DomainError::conflict(
            ConflictKind::AllocationRace,
            "Concurrent allocations claimed every candidate turn; retry",
        ))
    }
}

impl Default for AssignmentService {
    fn default() -> Self {
        Self::new()
    }
}
