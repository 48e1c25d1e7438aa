//! Item request/response models

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{
    items,
    sea_orm_active_enums::{Status, Unit},
};
use crate::models::pagination::SortKey;
use crate::models::{optional_text, required_text};

const MAX_NAME_LENGTH: usize = 120;
const MAX_BRAND_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit: Unit,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Descriptive item fields after validation. Used for create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails {
    pub name: String,
    pub description: Option<String>,
    pub unit: Unit,
    pub brand: Option<String>,
}

impl CreateItemRequest {
    pub fn validate(&self) -> Result<ItemDetails, String> {
        validate_details(&self.name, self.description.as_deref(), self.unit, self.brand.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit: Unit,
    #[serde(default)]
    pub brand: Option<String>,
}

impl UpdateItemRequest {
    pub fn validate(&self) -> Result<ItemDetails, String> {
        validate_details(&self.name, self.description.as_deref(), self.unit, self.brand.as_deref())
    }
}

fn validate_details(
    name: &str,
    description: Option<&str>,
    unit: Unit,
    brand: Option<&str>,
) -> Result<ItemDetails, String> {
    Ok(ItemDetails {
        name: required_text("name", name, MAX_NAME_LENGTH)?,
        description: optional_text("description", description, MAX_DESCRIPTION_LENGTH)?,
        unit,
        brand: optional_text("brand", brand, MAX_BRAND_LENGTH)?,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub is_favorite: bool,
}

/// Query parameters for item listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemListQuery {
    /// Case-insensitive name search
    pub search: Option<String>,
    /// Only favorites when true
    pub favorites_only: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemListFilter {
    pub search: Option<String>,
    pub favorites_only: bool,
}

impl ItemListQuery {
    pub fn validate(&self) -> Result<ItemListFilter, String> {
        Ok(ItemListFilter {
            search: optional_text("search", self.search.as_deref(), MAX_NAME_LENGTH)?,
            favorites_only: self.favorites_only.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSortField {
    Name,
    CreatedAt,
}

impl SortKey for ItemSortField {
    const ALLOWED: &'static str = "name, createdAt";

    fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(ItemSortField::Name),
            "createdAt" => Some(ItemSortField::CreatedAt),
            _ => None,
        }
    }

    fn default_key() -> Self {
        ItemSortField::Name
    }

    fn default_direction() -> crate::models::pagination::SortDirection {
        crate::models::pagination::SortDirection::Asc
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub unit: Unit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub is_favorite: bool,
    pub status: Status,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<items::Model> for ItemResponse {
    fn from(model: items::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            unit: model.unit,
            brand: model.brand,
            is_favorite: model.is_favorite,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_item_defaults() {
        let request: CreateItemRequest =
            serde_json::from_str(r#"{"name":"Whole milk","unit":"LITER"}"#).unwrap();
        assert!(!request.is_favorite);
        let details = request.validate().unwrap();
        assert_eq!(details.name, "Whole milk");
        assert_eq!(details.unit, Unit::Liter);
        assert_eq!(details.brand, None);
    }

    #[test]
    fn test_unknown_unit_rejected_by_serde() {
        let result: Result<CreateItemRequest, _> =
            serde_json::from_str(r#"{"name":"Eggs","unit":"DOZEN"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_item_list_query_defaults() {
        let filter = ItemListQuery::default().validate().unwrap();
        assert_eq!(filter, ItemListFilter::default());
    }

    #[test]
    fn test_item_sort_parse() {
        assert_eq!(ItemSortField::parse("name"), Some(ItemSortField::Name));
        assert_eq!(ItemSortField::parse("price"), None);
    }
}
