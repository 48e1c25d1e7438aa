//! Shopping list request/response models

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::Status, shopping_list_items, shopping_lists};
use crate::models::required_text;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShoppingListRequest {
    pub name: String,
}

impl CreateShoppingListRequest {
    pub fn validate(&self) -> Result<String, String> {
        required_text("name", &self.name, 120)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddShoppingListItemRequest {
    pub item_id: Uuid,
    pub quantity: Decimal,
}

impl AddShoppingListItemRequest {
    pub fn validate(&self) -> Result<(Uuid, Decimal), String> {
        if self.quantity <= Decimal::ZERO {
            return Err("quantity must be greater than zero".to_string());
        }
        if self.quantity.normalize().scale() > 3 {
            return Err("quantity cannot have more than 3 fractional digits".to_string());
        }
        Ok((self.item_id, self.quantity))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckItemRequest {
    pub checked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListEntryResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub quantity: Decimal,
    pub is_checked: bool,
}

impl From<shopping_list_items::Model> for ShoppingListEntryResponse {
    fn from(model: shopping_list_items::Model) -> Self {
        Self {
            id: model.id,
            item_id: model.item_id,
            quantity: model.quantity,
            is_checked: model.is_checked,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub status: Status,
    pub created_at: DateTime<FixedOffset>,
    pub entries: Vec<ShoppingListEntryResponse>,
}

impl ShoppingListResponse {
    pub fn new(list: shopping_lists::Model, entries: Vec<shopping_list_items::Model>) -> Self {
        Self {
            id: list.id,
            user_id: list.user_id,
            name: list.name,
            status: list.status,
            created_at: list.created_at,
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quantity_must_be_positive() {
        let request = AddShoppingListItemRequest {
            item_id: Uuid::new_v4(),
            quantity: dec!(0),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_fractional_quantity_allowed() {
        let request = AddShoppingListItemRequest {
            item_id: Uuid::new_v4(),
            quantity: dec!(0.75),
        };
        assert_eq!(request.validate().unwrap().1, dec!(0.75));
    }

    #[test]
    fn test_list_name_required() {
        let request = CreateShoppingListRequest {
            name: "".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
