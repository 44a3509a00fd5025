//! SeaORM adapter for modules.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::now_utc;
use crate::entities::modules;

pub mod dto;

pub use dto::ModuleCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
) -> Result<Option<modules::Model>, sea_orm::DbErr> {
    modules::Entity::find_by_id(module_id).one(conn).await
}

/// Load a module and hold a lock on it until the transaction ends.
///
/// Postgres gets `SELECT ... FOR UPDATE`. SQLite has no row locks, so a
/// no-op write takes the database write lock instead. It must be the first
/// statement of the transaction: a deferred transaction that has already
/// read cannot wait on `busy_timeout` for the lock and fails with
/// `database is locked` at once.
pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
) -> Result<Option<modules::Model>, sea_orm::DbErr> {
    let query = modules::Entity::find_by_id(module_id);
    let query = match conn.get_database_backend() {
        DbBackend::Sqlite => {
            modules::Entity::update_many()
                .col_expr(modules::Column::Id, Expr::col(modules::Column::Id).into())
                .filter(modules::Column::Id.eq(module_id))
                .exec(conn)
                .await?;
            query
        }
        _ => query.lock_exclusive(),
    };
    query.one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<modules::Model>, sea_orm::DbErr> {
    modules::Entity::find()
        .filter(modules::Column::Name.eq(name))
        .one(conn)
        .await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<modules::Model>, sea_orm::DbErr> {
    modules::Entity::find()
        .order_by_asc(modules::Column::Id)
        .all(conn)
        .await
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    modules::Entity::find().count(conn).await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ModuleCreate,
) -> Result<modules::Model, sea_orm::DbErr> {
    let now = now_utc();
    let module_active = modules::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        created_at: Set(now),
        updated_at: Set(now),
    };

    module_active.insert(conn).await
}

/// Rename a module; `None` when no row has `module_id`.
pub async fn update_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
    name: &str,
) -> Result<Option<modules::Model>, sea_orm::DbErr> {
    let result = modules::Entity::update_many()
        .col_expr(modules::Column::Name, Expr::val(name).into())
        .col_expr(modules::Column::UpdatedAt, Expr::val(now_utc()).into())
        .filter(modules::Column::Id.eq(module_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Ok(None);
    }
    find_by_id(conn, module_id).await
}

/// Delete one module (its link cascades). Returns rows removed.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = modules::Entity::delete_by_id(module_id).exec(conn).await?;
    Ok(result.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let result = modules::Entity::delete_many().exec(conn).await?;
    Ok(result.rows_affected)
}
