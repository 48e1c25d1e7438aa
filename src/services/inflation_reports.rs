//! Saved inflation calculations

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{inflation_reports, prelude::InflationReports};
use crate::error::ServiceError;
use crate::models::inflation::{GenerateReportResponse, InflationOutcome, InflationReportResponse};
use crate::services::{directory, inflation::{self, InflationWindow}};

/// Run the inflation calculation and store it for the user.
///
/// An insufficient-data outcome is returned as-is and nothing is stored.
pub async fn generate_report(
    db: &DatabaseConnection,
    user_id: Uuid,
    item_id: Uuid,
    window: &InflationWindow,
) -> Result<GenerateReportResponse, ServiceError> {
    directory::find_active_user(db, user_id).await?;

    let outcome = inflation::compute_inflation(db, item_id, window).await?;
    let InflationOutcome::Calculated(result) = &outcome else {
        return Ok(GenerateReportResponse { outcome, report: None });
    };

    let report = inflation_reports::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        item_id: Set(item_id),
        currency: Set(result.currency),
        start_date: Set(result.start_date),
        end_date: Set(result.end_date),
        started_price: Set(result.started_price),
        last_price: Set(result.last_price),
        price_difference: Set(result.price_difference),
        inflation_rate: Set(result.inflation_rate),
        created_at: Set(Utc::now().fixed_offset()),
    };
    let saved = report.insert(db).await?;

    info!(
        report_id = %saved.id,
        user_id = %user_id,
        item_id = %item_id,
        rate = %saved.inflation_rate,
        "Stored inflation report"
    );
    Ok(GenerateReportResponse {
        outcome,
        report: Some(InflationReportResponse::from(saved)),
    })
}

pub async fn list_user_reports(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<inflation_reports::Model>, ServiceError> {
    directory::find_active_user(db, user_id).await?;

    Ok(InflationReports::find()
        .filter(inflation_reports::Column::UserId.eq(user_id))
        .order_by_desc(inflation_reports::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn get_report(
    db: &DatabaseConnection,
    report_id: Uuid,
) -> Result<inflation_reports::Model, ServiceError> {
    InflationReports::find_by_id(report_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Inflation report", report_id))
}
