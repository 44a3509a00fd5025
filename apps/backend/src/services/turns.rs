//! Turn service: ticket CRUD and the `used` toggle.

use sea_orm::ConnectionTrait;
use tracing::{debug, info, warn};

use crate::domain::labels;
use crate::domain::LookupKey;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::module_turns;
use crate::repos::turns::{self, Turn};
use crate::utils::find_or_fail::find_or_not_found;

#[derive(Debug, Clone, Copy)]
pub struct TurnService;

impl TurnService {
    pub fn new() -> Self {
        Self
    }

    /// Issue a new ticket labelled `TRN-<count + 1>`, available for allocation.
    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Turn, DomainError> {
        let ordinal = turns::count(conn).await? + 1;
        let turn = turns::create(conn, &labels::turn_label(ordinal), None).await?;
        info!(turn_id = turn.id, label = %turn.label, "turn created");
        Ok(turn)
    }

    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        used: Option<bool>,
    ) -> Result<Vec<Turn>, DomainError> {
        turns::list(conn, used).await
    }

    pub async fn find<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        key: &LookupKey,
    ) -> Result<Turn, DomainError> {
        let detail = format!("Turn {key} not found");
        match key {
            LookupKey::ById(id) => {
                find_or_not_found(turns::find_by_id(conn, *id), NotFoundKind::Turn, detail).await
            }
            LookupKey::ByLabel(label) => {
                find_or_not_found(turns::find_by_label(conn, label), NotFoundKind::Turn, detail)
                    .await
            }
        }
    }

    /// Set `used` to `explicit`, or flip it when `explicit` is `None`.
    ///
    /// Links pointing at the turn are left as they are: a turn made
    /// available again can be handed to another module while an older link
    /// still references it.
    pub async fn toggle_used<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        turn_id: i64,
        explicit: Option<bool>,
    ) -> Result<Turn, DomainError> {
        let turn = self.find(conn, &LookupKey::ById(turn_id)).await?;
        let used = explicit.unwrap_or(!turn.used);

        if used != turn.used {
            turns::set_used(conn, turn_id, used).await?;
            if !used {
                let holders = module_turns::list_by_turn(conn, turn_id).await?;
                if !holders.is_empty() {
                    let module_ids: Vec<i64> = holders.iter().map(|l| l.module_id).collect();
                    warn!(turn_id, ?module_ids, "turn released while still linked");
                }
            }
        } else {
            debug!(turn_id, used, "turn already in requested state");
        }

        let updated = self.find(conn, &LookupKey::ById(turn_id)).await?;
        info!(turn_id, from = turn.used, to = updated.used, "turn used toggled");
        Ok(updated)
    }

    /// Delete the turn addressed by id or label; links to it cascade.
    pub async fn remove<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        key: &LookupKey,
    ) -> Result<(), DomainError> {
        let turn = self.find(conn, key).await?;
        if turns::delete(conn, turn.id).await? == 0 {
            return Err(DomainError::not_found(
                NotFoundKind::Turn,
                format!("Turn {key} not found"),
            ));
        }
        info!(turn_id = turn.id, label = %turn.label, "turn removed");
        Ok(())
    }

    /// Delete every turn (links cascade); returns the number removed.
    pub async fn remove_all<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<u64, DomainError> {
        let removed = turns::delete_all(conn).await?;
        info!(removed, "all turns removed");
        Ok(removed)
    }
}

impl Default for TurnService {
    fn default() -> Self {
        Self::new()
    }
}
