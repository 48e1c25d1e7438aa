//! Store request/response models

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{
    sea_orm_active_enums::{Status, StoreType},
    stores,
};
use crate::models::{optional_text, required_text};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    pub name: String,
    pub store_type: StoreType,
    pub city: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub name: String,
    pub store_type: StoreType,
    pub city: String,
    pub address: Option<String>,
}

impl CreateStoreRequest {
    pub fn validate(&self) -> Result<NewStore, String> {
        Ok(NewStore {
            name: required_text("name", &self.name, 120)?,
            store_type: self.store_type,
            city: required_text("city", &self.city, 100)?,
            address: optional_text("address", self.address.as_deref(), 255)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub store_type: StoreType,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub status: Status,
    pub created_at: DateTime<FixedOffset>,
}

impl From<stores::Model> for StoreResponse {
    fn from(model: stores::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            store_type: model.store_type,
            city: model.city,
            address: model.address,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_store_from_json() {
        let request: CreateStoreRequest = serde_json::from_str(
            r#"{"name":" Corner Market ","storeType":"MARKET","city":"Lyon"}"#,
        )
        .unwrap();
        let store = request.validate().unwrap();
        assert_eq!(store.name, "Corner Market");
        assert_eq!(store.store_type, StoreType::Market);
        assert_eq!(store.address, None);
    }

    #[test]
    fn test_blank_city_rejected() {
        let request = CreateStoreRequest {
            name: "Shop".to_string(),
            store_type: StoreType::Other,
            city: " ".to_string(),
            address: None,
        };
        assert!(request.validate().unwrap_err().contains("city"));
    }
}
