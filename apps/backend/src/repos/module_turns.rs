//! Module -> turn link repository functions.

use sea_orm::ConnectionTrait;

use super::modules::Module;
use super::turns::Turn;
use crate::adapters::module_turns_sea as links_adapter;
use crate::errors::domain::DomainError;

/// A module's current assignment
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub module_id: i64,
    pub turn_id: i64,
    pub created_at: time::OffsetDateTime,
    /// The linked turn, when it was loaded alongside the link
    pub turn: Option<Turn>,
}

impl Link {
    fn from_parts(link: crate::entities::module_turns::Model, turn: Option<Turn>) -> Self {
        Self {
            id: link.id,
            module_id: link.module_id,
            turn_id: link.turn_id,
            created_at: link.created_at,
            turn,
        }
    }
}

pub async fn find_by_module_with_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
) -> Result<Option<Link>, DomainError> {
    let found = links_adapter::find_by_module_with_turn(conn, module_id).await?;
    Ok(found.map(|(link, turn)| Link::from_parts(link, turn.map(Turn::from))))
}

pub async fn list_by_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Vec<Link>, DomainError> {
    let links = links_adapter::list_by_turn(conn, turn_id).await?;
    Ok(links
        .into_iter()
        .map(|link| Link::from_parts(link, None))
        .collect())
}

pub async fn list_modules_with_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(Module, Option<Turn>)>, DomainError> {
    let rows = links_adapter::list_modules_with_turn(conn).await?;
    Ok(rows
        .into_iter()
        .map(|(module, turn)| (Module::from(module), turn.map(Turn::from)))
        .collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
    turn_id: i64,
) -> Result<Link, DomainError> {
    let link = links_adapter::create(conn, module_id, turn_id).await?;
    Ok(Link::from_parts(link, None))
}

pub async fn delete_by_module_and_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
    turn_id: i64,
) -> Result<u64, DomainError> {
    Ok(links_adapter::delete_by_module_and_turn(conn, module_id, turn_id).await?)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(links_adapter::delete_all(conn).await?)
}
