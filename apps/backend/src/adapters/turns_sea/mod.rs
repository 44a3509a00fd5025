//! SeaORM adapter for turns.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{now_utc, truncate_to_seconds};
use crate::entities::turns;

pub mod dto;

pub use dto::TurnCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Option<turns::Model>, sea_orm::DbErr> {
    turns::Entity::find_by_id(turn_id).one(conn).await
}

/// First turn carrying `label` (labels are not unique).
pub async fn find_by_label<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    label: &str,
) -> Result<Option<turns::Model>, sea_orm::DbErr> {
    turns::Entity::find()
        .filter(turns::Column::Turn.eq(label))
        .order_by_asc(turns::Column::Id)
        .one(conn)
        .await
}

/// Oldest unused turn by `(created_at, id)`.
pub async fn find_next_available<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<turns::Model>, sea_orm::DbErr> {
    turns::Entity::find()
        .filter(turns::Column::Used.eq(false))
        .order_by_asc(turns::Column::CreatedAt)
        .order_by_asc(turns::Column::Id)
        .one(conn)
        .await
}

/// Turns in FIFO order, optionally filtered by `used`.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    used: Option<bool>,
) -> Result<Vec<turns::Model>, sea_orm::DbErr> {
    let mut query = turns::Entity::find();
    if let Some(used) = used {
        query = query.filter(turns::Column::Used.eq(used));
    }
    query
        .order_by_asc(turns::Column::CreatedAt)
        .order_by_asc(turns::Column::Id)
        .all(conn)
        .await
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    turns::Entity::find().count(conn).await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TurnCreate,
) -> Result<turns::Model, sea_orm::DbErr> {
    let now = now_utc();
    let created_at = dto.created_at.map(truncate_to_seconds).unwrap_or(now);
    let turn_active = turns::ActiveModel {
        id: NotSet,
        turn: Set(dto.turn),
        used: Set(false),
        created_at: Set(created_at),
        updated_at: Set(now),
    };

    turn_active.insert(conn).await
}

/// Unconditionally set `used`. Returns rows affected (0 when the turn is gone).
pub async fn set_used<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    used: bool,
) -> Result<u64, sea_orm::DbErr> {
    let result = turns::Entity::update_many()
        .col_expr(turns::Column::Used, Expr::val(used).into())
        .col_expr(turns::Column::UpdatedAt, Expr::val(now_utc()).into())
        .filter(turns::Column::Id.eq(turn_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Mark an available turn used, only if it is still available.
///
/// Returns `false` when another transaction got there first.
pub async fn claim<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let result = turns::Entity::update_many()
        .col_expr(turns::Column::Used, Expr::val(true).into())
        .col_expr(turns::Column::UpdatedAt, Expr::val(now_utc()).into())
        .filter(turns::Column::Id.eq(turn_id))
        .filter(turns::Column::Used.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}

/// Delete one turn (links to it cascade). Returns rows removed.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = turns::Entity::delete_by_id(turn_id).exec(conn).await?;
    Ok(result.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let result = turns::Entity::delete_many().exec(conn).await?;
    Ok(result.rows_affected)
}
