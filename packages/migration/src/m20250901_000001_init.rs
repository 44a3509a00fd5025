use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Modules {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Turns {
    Table,
    Id,
    Turn,
    Used,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ModuleTurns {
    Table,
    Id,
    ModuleId,
    TurnId,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // modules
        manager
            .create_table(
                Table::create()
                    .table(Modules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Modules::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Modules::Name).string().not_null())
                    .col(
                        ColumnDef::new(Modules::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Modules::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_modules_name")
                    .table(Modules::Table)
                    .col(Modules::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // turns
        manager
            .create_table(
                Table::create()
                    .table(Turns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Turns::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Turns::Turn).string().not_null())
                    .col(
                        ColumnDef::new(Turns::Used)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Turns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Turns::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // FIFO scan: oldest unused turn first
        manager
            .create_index(
                Index::create()
                    .name("ix_turns_used_created_at")
                    .table(Turns::Table)
                    .col(Turns::Used)
                    .col(Turns::CreatedAt)
                    .col(Turns::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_turns_turn")
                    .table(Turns::Table)
                    .col(Turns::Turn)
                    .to_owned(),
            )
            .await?;

        // module_turns
        manager
            .create_table(
                Table::create()
                    .table(ModuleTurns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModuleTurns::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(ModuleTurns::ModuleId).big_integer().not_null())
                    .col(ColumnDef::new(ModuleTurns::TurnId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ModuleTurns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_module_turns_module_id")
                            .from(ModuleTurns::Table, ModuleTurns::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_module_turns_turn_id")
                            .from(ModuleTurns::Table, ModuleTurns::TurnId)
                            .to(Turns::Table, Turns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A module holds at most one link at a time
        manager
            .create_index(
                Index::create()
                    .name("ux_module_turns_module_id")
                    .table(ModuleTurns::Table)
                    .col(ModuleTurns::ModuleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_module_turns_turn_id")
                    .table(ModuleTurns::Table)
                    .col(ModuleTurns::TurnId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ix_module_turns_turn_id")
                    .table(ModuleTurns::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_module_turns_module_id")
                    .table(ModuleTurns::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ModuleTurns::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_turns_turn")
                    .table(Turns::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_turns_used_created_at")
                    .table(Turns::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Turns::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_modules_name")
                    .table(Modules::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Modules::Table).to_owned())
            .await?;

        Ok(())
    }
}
