//! Price alert request/response models

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{price_alerts, sea_orm_active_enums::Currency};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePriceAlertRequest {
    pub item_id: Uuid,
    pub target_price: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPriceAlert {
    pub item_id: Uuid,
    pub target_price: Decimal,
    pub currency: Currency,
}

impl CreatePriceAlertRequest {
    pub fn validate(&self) -> Result<NewPriceAlert, String> {
        if self.target_price <= Decimal::ZERO {
            return Err("targetPrice must be greater than zero".to_string());
        }
        Ok(NewPriceAlert {
            item_id: self.item_id,
            target_price: self.target_price.round_dp(2),
            currency: self.currency.parse()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlertResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub target_price: Decimal,
    pub currency: Currency,
    pub created_at: DateTime<FixedOffset>,
}

impl From<price_alerts::Model> for PriceAlertResponse {
    fn from(model: price_alerts::Model) -> Self {
        Self {
            id: model.id,
            item_id: model.item_id,
            target_price: model.target_price,
            currency: model.currency,
            created_at: model.created_at,
        }
    }
}

/// Result of checking one alert against the latest recorded price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvaluation {
    pub alert_id: Uuid,
    pub item_id: Uuid,
    pub currency: Currency,
    pub target_price: Decimal,
    /// None when the item has no active price in this currency
    pub latest_price: Option<Decimal>,
    pub triggered: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_target_must_be_positive() {
        let request = CreatePriceAlertRequest {
            item_id: Uuid::new_v4(),
            target_price: dec!(0),
            currency: "EUR".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_valid_alert() {
        let request = CreatePriceAlertRequest {
            item_id: Uuid::new_v4(),
            target_price: dec!(1.99),
            currency: "usd".to_string(),
        };
        let alert = request.validate().unwrap();
        assert_eq!(alert.currency, Currency::Usd);
        assert_eq!(alert.target_price, dec!(1.99));
    }
}
