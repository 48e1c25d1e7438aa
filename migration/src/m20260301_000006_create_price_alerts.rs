use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PriceAlerts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PriceAlerts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(PriceAlerts::UserId).uuid().not_null())
                    .col(ColumnDef::new(PriceAlerts::ItemId).uuid().not_null())
                    .col(
                        ColumnDef::new(PriceAlerts::TargetPrice)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PriceAlerts::Currency).string_len(3).not_null())
                    .col(
                        ColumnDef::new(PriceAlerts::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(PriceAlerts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_price_alerts_user_id")
                            .from(PriceAlerts::Table, PriceAlerts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_price_alerts_item_id")
                            .from(PriceAlerts::Table, PriceAlerts::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_price_alerts_user_status")
                    .table(PriceAlerts::Table)
                    .col(PriceAlerts::UserId)
                    .col(PriceAlerts::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PriceAlerts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PriceAlerts {
    Table,
    Id,
    UserId,
    ItemId,
    TargetPrice,
    Currency,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
}
