//! `SeaORM` Entity for users table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::Status;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub display_name: String,
    pub status: Status,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stores::Entity")]
    Stores,
    #[sea_orm(has_many = "super::shopping_lists::Entity")]
    ShoppingLists,
    #[sea_orm(has_many = "super::price_alerts::Entity")]
    PriceAlerts,
}

impl Related<super::stores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stores.def()
    }
}

impl Related<super::shopping_lists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingLists.def()
    }
}

impl Related<super::price_alerts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PriceAlerts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
