use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShoppingLists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShoppingLists::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShoppingLists::UserId).uuid().not_null())
                    .col(ColumnDef::new(ShoppingLists::Name).string_len(120).not_null())
                    .col(
                        ColumnDef::new(ShoppingLists::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(ShoppingLists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(ShoppingLists::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shopping_lists_user_id")
                            .from(ShoppingLists::Table, ShoppingLists::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ShoppingListItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShoppingListItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ShoppingListItems::ShoppingListId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ShoppingListItems::ItemId).uuid().not_null())
                    .col(
                        ColumnDef::new(ShoppingListItems::Quantity)
                            .decimal_len(10, 3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShoppingListItems::IsChecked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ShoppingListItems::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(ShoppingListItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(ShoppingListItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shopping_list_items_list_id")
                            .from(ShoppingListItems::Table, ShoppingListItems::ShoppingListId)
                            .to(ShoppingLists::Table, ShoppingLists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shopping_list_items_item_id")
                            .from(ShoppingListItems::Table, ShoppingListItems::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shopping_list_items_list")
                    .table(ShoppingListItems::Table)
                    .col(ShoppingListItems::ShoppingListId)
                    .col(ShoppingListItems::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShoppingListItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShoppingLists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShoppingLists {
    Table,
    Id,
    UserId,
    Name,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ShoppingListItems {
    Table,
    Id,
    ShoppingListId,
    ItemId,
    Quantity,
    IsChecked,
    Status,
    CreatedAt,
    UpdatedAt,
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
