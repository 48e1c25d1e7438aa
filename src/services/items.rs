//! Item catalogue service

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{items, prelude::Items, sea_orm_active_enums::Status};
use crate::error::ServiceError;
use crate::models::item::{ItemDetails, ItemListFilter, ItemSortField};
use crate::models::pagination::{Page, PageRequest};
use crate::services::directory;

pub async fn create_item(
    db: &DatabaseConnection,
    details: ItemDetails,
    is_favorite: bool,
) -> Result<items::Model, ServiceError> {
    let now = Utc::now().fixed_offset();
    let item = items::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(details.name),
        description: Set(details.description),
        unit: Set(details.unit),
        brand: Set(details.brand),
        is_favorite: Set(is_favorite),
        status: Set(Status::Active),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let saved = item.insert(db).await?;

    info!(item_id = %saved.id, name = %saved.name, "Created item");
    Ok(saved)
}

pub async fn get_item(db: &DatabaseConnection, item_id: Uuid) -> Result<items::Model, ServiceError> {
    directory::find_active_item(db, item_id).await
}

/// Active items, optionally filtered by name and favorite flag
pub async fn list_items(
    db: &DatabaseConnection,
    filter: &ItemListFilter,
    page: &PageRequest<ItemSortField>,
) -> Result<Page<items::Model>, ServiceError> {
    let mut select = Items::find().filter(items::Column::Status.eq(Status::Active));

    if let Some(ref search) = filter.search {
        let pattern = format!("%{}%", search.to_lowercase());
        select = select.filter(Expr::expr(Func::lower(Expr::col(items::Column::Name))).like(pattern));
    }
    if filter.favorites_only {
        select = select.filter(items::Column::IsFavorite.eq(true));
    }

    let total = select.clone().count(db).await?;

    let column = match page.sort {
        ItemSortField::Name => items::Column::Name,
        ItemSortField::CreatedAt => items::Column::CreatedAt,
    };
    let content = select
        .order_by(column, page.direction.as_order())
        .order_by_asc(items::Column::Id)
        .offset(page.offset())
        .limit(page.size)
        .all(db)
        .await?;

    Ok(Page::new(content, page.page, page.size, total))
}

pub async fn update_item(
    db: &DatabaseConnection,
    item_id: Uuid,
    details: ItemDetails,
) -> Result<items::Model, ServiceError> {
    let existing = directory::find_active_item(db, item_id).await?;

    let mut active: items::ActiveModel = existing.into();
    active.name = Set(details.name);
    active.description = Set(details.description);
    active.unit = Set(details.unit);
    active.brand = Set(details.brand);
    active.updated_at = Set(Utc::now().fixed_offset());
    let updated = active.update(db).await?;

    info!(item_id = %item_id, "Updated item");
    Ok(updated)
}

pub async fn set_favorite(
    db: &DatabaseConnection,
    item_id: Uuid,
    is_favorite: bool,
) -> Result<items::Model, ServiceError> {
    let existing = directory::find_active_item(db, item_id).await?;
    if existing.is_favorite == is_favorite {
        return Ok(existing);
    }

    let mut active: items::ActiveModel = existing.into();
    active.is_favorite = Set(is_favorite);
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(active.update(db).await?)
}

/// Soft-delete an item. Its observations are kept untouched.
pub async fn deactivate_item(db: &DatabaseConnection, item_id: Uuid) -> Result<(), ServiceError> {
    let existing = directory::find_active_item(db, item_id).await?;

    let mut active: items::ActiveModel = existing.into();
    active.status = Set(Status::Inactive);
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(db).await?;

    info!(item_id = %item_id, "Deactivated item");
    Ok(())
}
