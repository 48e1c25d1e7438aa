//! Inflation request/response models
//!
//! An inflation computation either yields a `Calculated` result or the
//! `InsufficientData` sentinel. The sentinel is a normal 200 response.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{inflation_reports, sea_orm_active_enums::Currency};
use crate::services::inflation::InflationWindow;

/// Query parameters for GET /api/items/{id}/inflation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InflationQuery {
    /// EUR or USD (required)
    pub currency: Option<String>,
    /// Inclusive start of the window (required)
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of the window (required)
    pub end_date: Option<NaiveDate>,
}

impl InflationQuery {
    pub fn validate(&self) -> Result<InflationWindow, String> {
        let currency: Currency = self
            .currency
            .as_deref()
            .ok_or_else(|| "currency is required".to_string())?
            .parse()?;
        let start_date = self
            .start_date
            .ok_or_else(|| "start_date is required".to_string())?;
        let end_date = self
            .end_date
            .ok_or_else(|| "end_date is required".to_string())?;

        InflationWindow::new(currency, start_date, end_date)
    }
}

/// Body for POST /api/users/{id}/inflation-reports
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    pub item_id: Uuid,
    pub currency: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl GenerateReportRequest {
    pub fn validate(&self) -> Result<InflationWindow, String> {
        InflationQuery {
            currency: self.currency.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
        .validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationCalculationResult {
    pub item_id: Uuid,
    pub currency: Currency,
    /// Requested window start
    pub start_date: NaiveDate,
    /// Requested window end
    pub end_date: NaiveDate,
    pub first_observation_date: NaiveDate,
    pub last_observation_date: NaiveDate,
    pub started_price: Decimal,
    pub last_price: Decimal,
    pub price_difference: Decimal,
    /// Percentage change, two fractional digits
    pub inflation_rate: Decimal,
    pub observation_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InflationOutcome {
    Calculated(InflationCalculationResult),
    InsufficientData { message: String },
}

impl InflationOutcome {
    pub fn insufficient(message: impl Into<String>) -> Self {
        InflationOutcome::InsufficientData {
            message: message.into(),
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, InflationOutcome::InsufficientData { .. })
    }

    pub fn calculated(&self) -> Option<&InflationCalculationResult> {
        match self {
            InflationOutcome::Calculated(result) => Some(result),
            InflationOutcome::InsufficientData { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationReportResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_id: Uuid,
    pub currency: Currency,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub started_price: Decimal,
    pub last_price: Decimal,
    pub price_difference: Decimal,
    pub inflation_rate: Decimal,
    pub created_at: DateTime<FixedOffset>,
}

impl From<inflation_reports::Model> for InflationReportResponse {
    fn from(model: inflation_reports::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            item_id: model.item_id,
            currency: model.currency,
            start_date: model.start_date,
            end_date: model.end_date,
            started_price: model.started_price,
            last_price: model.last_price,
            price_difference: model.price_difference,
            inflation_rate: model.inflation_rate,
            created_at: model.created_at,
        }
    }
}

/// Response for report generation. `report` is absent when data was insufficient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportResponse {
    pub outcome: InflationOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<InflationReportResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_query_requires_currency() {
        let query = InflationQuery {
            currency: None,
            start_date: Some(date(2024, 1, 1)),
            end_date: Some(date(2024, 2, 1)),
        };
        assert_eq!(query.validate().unwrap_err(), "currency is required");
    }

    #[test]
    fn test_query_requires_dates() {
        let query = InflationQuery {
            currency: Some("EUR".to_string()),
            start_date: None,
            end_date: Some(date(2024, 2, 1)),
        };
        assert!(query.validate().unwrap_err().contains("start_date"));
    }

    #[test]
    fn test_query_valid() {
        let query = InflationQuery {
            currency: Some("usd".to_string()),
            start_date: Some(date(2024, 1, 1)),
            end_date: Some(date(2024, 1, 1)),
        };
        let window = query.validate().unwrap();
        assert_eq!(window.currency(), Currency::Usd);
    }

    #[test]
    fn test_insufficient_serializes_with_status_tag() {
        let outcome = InflationOutcome::insufficient("not enough");
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "INSUFFICIENT_DATA", "message": "not enough"})
        );
    }

    #[test]
    fn test_calculated_serializes_flat() {
        let outcome = InflationOutcome::Calculated(InflationCalculationResult {
            item_id: Uuid::nil(),
            currency: Currency::Eur,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 3, 1),
            first_observation_date: date(2024, 1, 2),
            last_observation_date: date(2024, 2, 28),
            started_price: dec!(2.00),
            last_price: dec!(3.00),
            price_difference: dec!(1.00),
            inflation_rate: dec!(50.00),
            observation_count: 3,
        });
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "CALCULATED");
        assert_eq!(value["inflationRate"], "50.00");
        assert_eq!(value["startedPrice"], "2.00");
        assert_eq!(value["currency"], "EUR");
        assert!(outcome.calculated().is_some());
    }
}
