//! Migration: Create the garments table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Garments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Garments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Garments::Type).string().null())
                    .col(ColumnDef::new(Garments::Description).string().null())
                    .col(ColumnDef::new(Garments::Size).string().null())
                    .col(ColumnDef::new(Garments::Price).double().not_null())
                    .col(ColumnDef::new(Garments::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Garments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Garments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_garments_user_id")
                            .from(Garments::Table, Garments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Ownership checks and owner listings filter on user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_garments_user_id")
                    .table(Garments::Table)
                    .col(Garments::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Garments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Garments {
    Table,
    Id,
    Type,
    Description,
    Size,
    Price,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
