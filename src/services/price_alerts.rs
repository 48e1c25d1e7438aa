//! Target-price alerts

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::entities::{
    price_alerts, price_observations,
    prelude::PriceAlerts,
    sea_orm_active_enums::{Currency, Status},
};
use crate::error::ServiceError;
use crate::models::price_alert::{AlertEvaluation, NewPriceAlert};
use crate::services::directory;
use crate::services::price_observations as price_observations_service;

/// An alert fires once the latest price has dropped to the target or below
pub fn is_triggered(latest_price: Option<Decimal>, target_price: Decimal) -> bool {
    matches!(latest_price, Some(price) if price <= target_price)
}

pub async fn create_alert(
    db: &DatabaseConnection,
    user_id: Uuid,
    new: NewPriceAlert,
) -> Result<price_alerts::Model, ServiceError> {
    directory::find_active_user(db, user_id).await?;
    directory::find_active_item(db, new.item_id).await?;

    let alert = price_alerts::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        item_id: Set(new.item_id),
        target_price: Set(new.target_price),
        currency: Set(new.currency),
        status: Set(Status::Active),
        created_at: Set(Utc::now().fixed_offset()),
    };
    let saved = alert.insert(db).await?;

    info!(
        alert_id = %saved.id,
        item_id = %saved.item_id,
        target = %saved.target_price,
        currency = %saved.currency,
        "Created price alert"
    );
    Ok(saved)
}

pub async fn list_user_alerts(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<price_alerts::Model>, ServiceError> {
    directory::find_active_user(db, user_id).await?;

    Ok(PriceAlerts::find()
        .filter(price_alerts::Column::UserId.eq(user_id))
        .filter(price_alerts::Column::Status.eq(Status::Active))
        .order_by_desc(price_alerts::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn deactivate_alert(
    db: &DatabaseConnection,
    user_id: Uuid,
    alert_id: Uuid,
) -> Result<(), ServiceError> {
    let alert = PriceAlerts::find_by_id(alert_id)
        .filter(price_alerts::Column::Status.eq(Status::Active))
        .one(db)
        .await?
        .filter(|alert| alert.user_id == user_id)
        .ok_or_else(|| ServiceError::not_found("Price alert", alert_id))?;

    let mut active: price_alerts::ActiveModel = alert.into();
    active.status = Set(Status::Inactive);
    active.update(db).await?;

    info!(alert_id = %alert_id, "Deactivated price alert");
    Ok(())
}

/// Latest active observation of the item in one currency. Shares its
/// ordering with `find_latest_active_price`.
fn latest_in_currency_query(
    item_id: Uuid,
    currency: Currency,
) -> Select<price_observations::Entity> {
    price_observations_service::latest_active_query(item_id)
        .filter(price_observations::Column::Currency.eq(currency))
}

async fn latest_price_in(
    db: &DatabaseConnection,
    item_id: Uuid,
    currency: Currency,
) -> Result<Option<Decimal>, ServiceError> {
    let latest = latest_in_currency_query(item_id, currency).one(db).await?;
    Ok(latest.map(|observation| observation.price))
}

/// Check every active alert of the user against the latest recorded price
pub async fn evaluate_alerts(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<AlertEvaluation>, ServiceError> {
    let alerts = list_user_alerts(db, user_id).await?;

    let mut evaluations = Vec::with_capacity(alerts.len());
    for alert in alerts {
        let latest_price = latest_price_in(db, alert.item_id, alert.currency).await?;
        if latest_price.is_none() {
            warn!(alert_id = %alert.id, item_id = %alert.item_id, "No price to evaluate alert against");
        }

        evaluations.push(AlertEvaluation {
            alert_id: alert.id,
            item_id: alert.item_id,
            currency: alert.currency,
            target_price: alert.target_price,
            latest_price,
            triggered: is_triggered(latest_price, alert.target_price),
        });
    }

    debug!(
        user_id = %user_id,
        evaluated = evaluations.len(),
        triggered = evaluations.iter().filter(|e| e.triggered).count(),
        "Evaluated price alerts"
    );
    Ok(evaluations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_triggers_at_or_below_target() {
        assert!(is_triggered(Some(dec!(1.99)), dec!(2.00)));
        assert!(is_triggered(Some(dec!(2.00)), dec!(2.00)));
        assert!(!is_triggered(Some(dec!(2.01)), dec!(2.00)));
    }

    #[test]
    fn test_no_price_never_triggers() {
        assert!(!is_triggered(None, dec!(100)));
    }

    #[test]
    fn test_alert_price_lookup_matches_latest_price_ordering() {
        let item_id = Uuid::new_v4();
        let sql = latest_in_currency_query(item_id, Currency::Usd)
            .build(DbBackend::Postgres)
            .to_string();
        let latest_sql = price_observations_service::latest_active_query(item_id)
            .build(DbBackend::Postgres)
            .to_string();

        let order_by = |sql: &str| sql[sql.find("ORDER BY").unwrap()..].to_string();
        assert_eq!(order_by(&sql), order_by(&latest_sql));
        assert!(sql.contains(r#""price_observations"."currency" = 'USD'"#), "{}", sql);
        assert!(sql.contains(r#""price_observations"."status" = 'ACTIVE'"#), "{}", sql);
    }
}
