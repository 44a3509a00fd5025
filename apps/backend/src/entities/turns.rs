use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "turns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Ticket label, e.g. `TRN-3`
    pub turn: String,
    /// True once the turn can no longer be handed out
    pub used: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::module_turns::Entity")]
    ModuleTurns,
}

impl Related<super::module_turns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModuleTurns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
