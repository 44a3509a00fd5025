//! Module repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::modules_sea::{self as modules_adapter, ModuleCreate};
use crate::errors::domain::DomainError;

/// Module domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub id: i64,
    pub name: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
) -> Result<Option<Module>, DomainError> {
    let module = modules_adapter::find_by_id(conn, module_id).await?;
    Ok(module.map(Module::from))
}

/// Like [`find_by_id`] but row-locks the module for the rest of the transaction.
pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
) -> Result<Option<Module>, DomainError> {
    let module = modules_adapter::find_by_id_for_update(conn, module_id).await?;
    Ok(module.map(Module::from))
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<Module>, DomainError> {
    let module = modules_adapter::find_by_name(conn, name).await?;
    Ok(module.map(Module::from))
}

pub async fn list<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Module>, DomainError> {
    let modules = modules_adapter::list(conn).await?;
    Ok(modules.into_iter().map(Module::from).collect())
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(modules_adapter::count(conn).await?)
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Module, DomainError> {
    let module = modules_adapter::create(conn, ModuleCreate::new(name)).await?;
    Ok(Module::from(module))
}

pub async fn update_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
    name: &str,
) -> Result<Option<Module>, DomainError> {
    let module = modules_adapter::update_name(conn, module_id, name).await?;
    Ok(module.map(Module::from))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
) -> Result<u64, DomainError> {
    Ok(modules_adapter::delete(conn, module_id).await?)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(modules_adapter::delete_all(conn).await?)
}

impl From<crate::entities::modules::Model> for Module {
    fn from(model: crate::entities::modules::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
