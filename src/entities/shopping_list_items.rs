//! `SeaORM` Entity for shopping_list_items table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::Status;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "shopping_list_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub item_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub quantity: Decimal,
    pub is_checked: bool,
    pub status: Status,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shopping_lists::Entity",
        from = "Column::ShoppingListId",
        to = "super::shopping_lists::Column::Id"
    )]
    ShoppingLists,
    #[sea_orm(
        belongs_to = "super::items::Entity",
        from = "Column::ItemId",
        to = "super::items::Column::Id"
    )]
    Items,
}

impl Related<super::shopping_lists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingLists.def()
    }
}

impl Related<super::items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
