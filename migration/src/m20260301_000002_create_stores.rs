use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stores::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stores::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Stores::UserId).uuid().not_null())
                    .col(ColumnDef::new(Stores::Name).string_len(120).not_null())
                    .col(ColumnDef::new(Stores::StoreType).string_len(16).not_null())
                    .col(ColumnDef::new(Stores::City).string_len(100).not_null())
                    .col(ColumnDef::new(Stores::Address).string_len(255))
                    .col(
                        ColumnDef::new(Stores::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(Stores::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(Stores::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        // Foreign key to users
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_stores_user_id")
                    .from(Stores::Table, Stores::UserId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // Owner listing and city/type filtering
        manager
            .create_index(
                Index::create()
                    .name("idx_stores_user_status")
                    .table(Stores::Table)
                    .col(Stores::UserId)
                    .col(Stores::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stores_city_type")
                    .table(Stores::Table)
                    .col(Stores::City)
                    .col(Stores::StoreType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stores::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Stores {
    Table,
    Id,
    UserId,
    Name,
    StoreType,
    City,
    Address,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
