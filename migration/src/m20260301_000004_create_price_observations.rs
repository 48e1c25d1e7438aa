use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PriceObservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PriceObservations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PriceObservations::ItemId).uuid().not_null())
                    .col(ColumnDef::new(PriceObservations::StoreId).uuid().not_null())
                    .col(
                        ColumnDef::new(PriceObservations::Price)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PriceObservations::Currency)
                            .string_len(3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PriceObservations::ObservationDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PriceObservations::Location)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PriceObservations::Notes).text())
                    .col(
                        ColumnDef::new(PriceObservations::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(PriceObservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_price_observations_item_id")
                    .from(PriceObservations::Table, PriceObservations::ItemId)
                    .to(Items::Table, Items::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_price_observations_store_id")
                    .from(PriceObservations::Table, PriceObservations::StoreId)
                    .to(Stores::Table, Stores::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        // Range lookups for inflation: (item_id, currency, observation_date)
        manager
            .create_index(
                Index::create()
                    .name("idx_price_observations_item_currency_date")
                    .table(PriceObservations::Table)
                    .col(PriceObservations::ItemId)
                    .col(PriceObservations::Currency)
                    .col(PriceObservations::ObservationDate)
                    .to_owned(),
            )
            .await?;

        // Latest active price: (item_id, status, created_at DESC)
        manager
            .create_index(
                Index::create()
                    .name("idx_price_observations_item_status_created")
                    .table(PriceObservations::Table)
                    .col(PriceObservations::ItemId)
                    .col(PriceObservations::Status)
                    .col((PriceObservations::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_price_observations_store")
                    .table(PriceObservations::Table)
                    .col(PriceObservations::StoreId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PriceObservations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PriceObservations {
    Table,
    Id,
    ItemId,
    StoreId,
    Price,
    Currency,
    ObservationDate,
    Location,
    Notes,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Stores {
    Table,
    Id,
}
