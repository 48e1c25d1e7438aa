//! `SeaORM` Entity for items table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{Status, Unit};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub unit: Unit,
    pub brand: Option<String>,
    pub is_favorite: bool,
    pub status: Status,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::price_observations::Entity")]
    PriceObservations,
    #[sea_orm(has_many = "super::item_categories::Entity")]
    ItemCategories,
}

impl Related<super::price_observations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PriceObservations.def()
    }
}

impl Related<super::item_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemCategories.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::item_categories::Relation::Categories.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::item_categories::Relation::Items.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
