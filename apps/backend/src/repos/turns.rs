//! Turn repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::turns_sea::{self as turns_adapter, TurnCreate};
use crate::errors::domain::DomainError;

/// Turn domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub id: i64,
    /// Ticket label (`turn` column)
    pub label: String,
    pub used: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Option<Turn>, DomainError> {
    let turn = turns_adapter::find_by_id(conn, turn_id).await?;
    Ok(turn.map(Turn::from))
}

pub async fn find_by_label<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    label: &str,
) -> Result<Option<Turn>, DomainError> {
    let turn = turns_adapter::find_by_label(conn, label).await?;
    Ok(turn.map(Turn::from))
}

/// Oldest turn still available for allocation.
pub async fn find_next_available<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<Turn>, DomainError> {
    let turn = turns_adapter::find_next_available(conn).await?;
    Ok(turn.map(Turn::from))
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    used: Option<bool>,
) -> Result<Vec<Turn>, DomainError> {
    let turns = turns_adapter::list(conn, used).await?;
    Ok(turns.into_iter().map(Turn::from).collect())
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(turns_adapter::count(conn).await?)
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    label: &str,
    created_at: Option<OffsetDateTime>,
) -> Result<Turn, DomainError> {
    let mut dto = TurnCreate::new(label);
    if let Some(created_at) = created_at {
        dto = dto.with_created_at(created_at);
    }
    let turn = turns_adapter::create(conn, dto).await?;
    Ok(Turn::from(turn))
}

pub async fn set_used<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    used: bool,
) -> Result<u64, DomainError> {
    Ok(turns_adapter::set_used(conn, turn_id, used).await?)
}

/// Conditional `used: false -> true`; `false` means someone else claimed it.
pub async fn claim<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<bool, DomainError> {
    Ok(turns_adapter::claim(conn, turn_id).await?)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<u64, DomainError> {
    Ok(turns_adapter::delete(conn, turn_id).await?)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(turns_adapter::delete_all(conn).await?)
}

impl From<crate::entities::turns::Model> for Turn {
    fn from(model: crate::entities::turns::Model) -> Self {
        Self {
            id: model.id,
            label: model.turn,
            used: model.used,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
