use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InflationReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InflationReports::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InflationReports::UserId).uuid().not_null())
                    .col(ColumnDef::new(InflationReports::ItemId).uuid().not_null())
                    .col(
                        ColumnDef::new(InflationReports::Currency)
                            .string_len(3)
                            .not_null(),
                    )
                    .col(ColumnDef::new(InflationReports::StartDate).date().not_null())
                    .col(ColumnDef::new(InflationReports::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(InflationReports::StartedPrice)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InflationReports::LastPrice)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InflationReports::PriceDifference)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InflationReports::InflationRate)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InflationReports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inflation_reports_user_id")
                            .from(InflationReports::Table, InflationReports::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inflation_reports_item_id")
                            .from(InflationReports::Table, InflationReports::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inflation_reports_user_created")
                    .table(InflationReports::Table)
                    .col(InflationReports::UserId)
                    .col((InflationReports::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InflationReports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InflationReports {
    Table,
    Id,
    UserId,
    ItemId,
    Currency,
    StartDate,
    EndDate,
    StartedPrice,
    LastPrice,
    PriceDifference,
    InflationRate,
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
