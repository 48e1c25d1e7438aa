//! Price observation service
//!
//! Observations are append-only: recording a new price inserts a row, and the
//! only later changes allowed are the free-text notes and the status flag.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::entities::{
    prelude::PriceObservations,
    price_observations,
    sea_orm_active_enums::Status,
};
use crate::error::ServiceError;
use crate::models::pagination::{Page, PageRequest};
use crate::models::price_observation::{NewPriceObservation, PriceSortField};
use crate::services::directory;
use crate::services::price_filter::{self, PriceObservationFilter};

/// Insert a new observation for an active item at an active store
pub async fn record_observation(
    db: &DatabaseConnection,
    new: NewPriceObservation,
) -> Result<price_observations::Model, ServiceError> {
    directory::find_active_item(db, new.item_id).await?;
    directory::find_active_store(db, new.store_id).await?;

    let observation = price_observations::ActiveModel {
        id: Set(Uuid::new_v4()),
        item_id: Set(new.item_id),
        store_id: Set(new.store_id),
        price: Set(new.price),
        currency: Set(new.currency),
        observation_date: Set(new.observation_date),
        location: Set(new.location),
        notes: Set(new.notes),
        status: Set(Status::Active),
        created_at: Set(Utc::now().fixed_offset()),
    };
    let saved = observation.insert(db).await?;

    info!(
        observation_id = %saved.id,
        item_id = %saved.item_id,
        store_id = %saved.store_id,
        price = %saved.price,
        currency = %saved.currency,
        "Recorded price observation"
    );
    Ok(saved)
}

pub async fn get_observation(
    db: &DatabaseConnection,
    observation_id: Uuid,
) -> Result<price_observations::Model, ServiceError> {
    PriceObservations::find_by_id(observation_id)
        .filter(price_observations::Column::Status.eq(Status::Active))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Price observation", observation_id))
}

pub async fn update_notes(
    db: &DatabaseConnection,
    observation_id: Uuid,
    notes: Option<String>,
) -> Result<price_observations::Model, ServiceError> {
    let existing = get_observation(db, observation_id).await?;

    let mut active: price_observations::ActiveModel = existing.into();
    active.notes = Set(notes);
    let updated = active.update(db).await?;

    debug!(observation_id = %observation_id, "Updated observation notes");
    Ok(updated)
}

/// Soft-delete; the row stays for history but drops out of calculations
pub async fn deactivate_observation(
    db: &DatabaseConnection,
    observation_id: Uuid,
) -> Result<(), ServiceError> {
    let existing = get_observation(db, observation_id).await?;

    let mut active: price_observations::ActiveModel = existing.into();
    active.status = Set(Status::Inactive);
    active.update(db).await?;

    info!(observation_id = %observation_id, "Deactivated price observation");
    Ok(())
}

/// Active observations of the item, most recently recorded first
pub fn latest_active_query(item_id: Uuid) -> Select<price_observations::Entity> {
    PriceObservations::find()
        .filter(price_observations::Column::ItemId.eq(item_id))
        .filter(price_observations::Column::Status.eq(Status::Active))
        .order_by_desc(price_observations::Column::CreatedAt)
        .order_by_desc(price_observations::Column::Id)
}

/// Most recently *recorded* active observation of the item.
///
/// Ordering is by insert time, not by observation date, so a back-dated entry
/// recorded today wins over an older recording of a later day.
pub async fn find_latest_active_price(
    db: &DatabaseConnection,
    item_id: Uuid,
) -> Result<price_observations::Model, ServiceError> {
    directory::find_active_item(db, item_id).await?;

    let latest = latest_active_query(item_id).one(db).await?;

    latest.ok_or_else(|| {
        warn!(item_id = %item_id, "No active price observation for item");
        ServiceError::not_found("Active price for item", item_id)
    })
}

/// Filtered, paginated search over all observations
pub async fn find_by_filters(
    db: &DatabaseConnection,
    filter: &PriceObservationFilter,
    page: &PageRequest<PriceSortField>,
) -> Result<Page<price_observations::Model>, ServiceError> {
    filter.validate().map_err(ServiceError::Validation)?;

    let total = price_filter::select_filtered(filter).count(db).await?;
    let content = price_filter::select_page(filter, page).all(db).await?;

    debug!(
        filter = ?filter,
        total = total,
        returned = content.len(),
        "Price observation search completed"
    );
    Ok(Page::new(content, page.page, page.size, total))
}
