//! Price observation request/response models

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{
    price_observations,
    sea_orm_active_enums::{Currency, Status, StoreType},
};
use crate::models::pagination::SortKey;
use crate::models::{optional_text, required_text};
use crate::services::price_filter::PriceObservationFilter;

/// Monetary precision of stored prices
pub const PRICE_SCALE: u32 = 2;

/// Prices must stay below this (column is NUMERIC(12, 2))
const MAX_PRICE: Decimal = dec!(10000000000);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePriceObservationRequest {
    pub item_id: Uuid,
    pub store_id: Uuid,
    pub price: Decimal,
    pub currency: String,
    pub observation_date: NaiveDate,
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPriceObservation {
    pub item_id: Uuid,
    pub store_id: Uuid,
    pub price: Decimal,
    pub currency: Currency,
    pub observation_date: NaiveDate,
    pub location: String,
    pub notes: Option<String>,
}

impl CreatePriceObservationRequest {
    pub fn validate(&self) -> Result<NewPriceObservation, String> {
        if self.price < Decimal::ZERO {
            return Err("price cannot be negative".to_string());
        }
        if self.price.normalize().scale() > PRICE_SCALE {
            return Err(format!(
                "price cannot have more than {} fractional digits",
                PRICE_SCALE
            ));
        }
        if self.price >= MAX_PRICE {
            return Err("price is too large".to_string());
        }

        Ok(NewPriceObservation {
            item_id: self.item_id,
            store_id: self.store_id,
            price: self.price.round_dp(PRICE_SCALE),
            currency: self.currency.parse()?,
            observation_date: self.observation_date,
            location: required_text("location", &self.location, 255)?,
            notes: optional_text("notes", self.notes.as_deref(), 2000)?,
        })
    }
}

/// Only the notes of an observation may change after insert
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotesRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdateNotesRequest {
    pub fn validate(&self) -> Result<Option<String>, String> {
        optional_text("notes", self.notes.as_deref(), 2000)
    }
}

/// Query parameters for GET /api/prices
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceSearchQuery {
    pub item_id: Option<Uuid>,
    pub store_id: Option<Uuid>,
    pub store_type: Option<StoreType>,
    pub city: Option<String>,
    pub currency: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub status: Option<Status>,
}

impl PriceSearchQuery {
    pub fn validate(&self) -> Result<PriceObservationFilter, String> {
        let currency = match self.currency.as_deref() {
            None => None,
            Some(code) => Some(code.parse::<Currency>()?),
        };

        let filter = PriceObservationFilter {
            item_id: self.item_id,
            store_id: self.store_id,
            store_type: self.store_type,
            city: optional_text("city", self.city.as_deref(), 100)?,
            currency,
            date_from: self.date_from,
            date_to: self.date_to,
            status: self.status,
        };
        filter.validate()?;
        Ok(filter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSortField {
    ObservationDate,
    Price,
    CreatedAt,
}

impl SortKey for PriceSortField {
    const ALLOWED: &'static str = "observationDate, price, createdAt";

    fn parse(s: &str) -> Option<Self> {
        match s {
            "observationDate" => Some(PriceSortField::ObservationDate),
            "price" => Some(PriceSortField::Price),
            "createdAt" => Some(PriceSortField::CreatedAt),
            _ => None,
        }
    }

    fn default_key() -> Self {
        PriceSortField::ObservationDate
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservationResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub store_id: Uuid,
    pub price: Decimal,
    pub currency: Currency,
    pub observation_date: NaiveDate,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: Status,
    pub created_at: DateTime<FixedOffset>,
}

impl From<price_observations::Model> for PriceObservationResponse {
    fn from(model: price_observations::Model) -> Self {
        Self {
            id: model.id,
            item_id: model.item_id,
            store_id: model.store_id,
            price: model.price,
            currency: model.currency,
            observation_date: model.observation_date,
            location: model.location,
            notes: model.notes,
            status: model.status,
            created_at: model.created_at,
        }
    }
}
