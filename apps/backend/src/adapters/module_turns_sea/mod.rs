//! SeaORM adapter for module -> turn links.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use super::now_utc;
use crate::entities::{module_turns, modules, turns};

/// The module's link together with the turn it points at.
pub async fn find_by_module_with_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
) -> Result<Option<(module_turns::Model, Option<turns::Model>)>, sea_orm::DbErr> {
    module_turns::Entity::find()
        .filter(module_turns::Column::ModuleId.eq(module_id))
        .find_also_related(turns::Entity)
        .one(conn)
        .await
}

/// Links that point at `turn_id`, oldest first.
pub async fn list_by_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Vec<module_turns::Model>, sea_orm::DbErr> {
    module_turns::Entity::find()
        .filter(module_turns::Column::TurnId.eq(turn_id))
        .order_by_asc(module_turns::Column::Id)
        .all(conn)
        .await
}

/// Every module (by id) paired with its linked turn, if any.
pub async fn list_modules_with_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(modules::Model, Option<turns::Model>)>, sea_orm::DbErr> {
    let all_modules = modules::Entity::find()
        .order_by_asc(modules::Column::Id)
        .all(conn)
        .await?;

    let mut linked: HashMap<i64, turns::Model> = module_turns::Entity::find()
        .find_also_related(turns::Entity)
        .all(conn)
        .await?
        .into_iter()
        .filter_map(|(link, turn)| turn.map(|t| (link.module_id, t)))
        .collect();

    Ok(all_modules
        .into_iter()
        .map(|m| {
            let turn = linked.remove(&m.id);
            (m, turn)
        })
        .collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
    turn_id: i64,
) -> Result<module_turns::Model, sea_orm::DbErr> {
    let link_active = module_turns::ActiveModel {
        id: NotSet,
        module_id: Set(module_id),
        turn_id: Set(turn_id),
        created_at: Set(now_utc()),
    };

    link_active.insert(conn).await
}

pub async fn delete_by_module_and_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_id: i64,
    turn_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = module_turns::Entity::delete_many()
        .filter(module_turns::Column::ModuleId.eq(module_id))
        .filter(module_turns::Column::TurnId.eq(turn_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let result = module_turns::Entity::delete_many().exec(conn).await?;
    Ok(result.rows_affected)
}
