use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{prelude::UserPreferences, user_preferences};
use crate::error::ServiceError;
use crate::models::preferences::{PreferencesResponse, PreferencesUpdate};
use crate::services::directory;

/// Stored preferences, or the defaults when the user never saved any
pub async fn get_preferences(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<PreferencesResponse, ServiceError> {
    directory::find_active_user(db, user_id).await?;

    let stored = UserPreferences::find()
        .filter(user_preferences::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    Ok(stored
        .map(PreferencesResponse::from)
        .unwrap_or_else(|| PreferencesResponse::defaults_for(user_id)))
}

/// Insert or replace the user's preferences row
pub async fn upsert_preferences(
    db: &DatabaseConnection,
    user_id: Uuid,
    update: PreferencesUpdate,
) -> Result<PreferencesResponse, ServiceError> {
    directory::find_active_user(db, user_id).await?;

    let now = Utc::now().fixed_offset();
    let existing = UserPreferences::find()
        .filter(user_preferences::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    let saved = match existing {
        Some(model) => {
            let mut active: user_preferences::ActiveModel = model.into();
            active.preferred_currency = Set(update.preferred_currency);
            active.default_city = Set(update.default_city);
            active.notifications_enabled = Set(update.notifications_enabled);
            active.updated_at = Set(now);
            active.update(db).await?
        }
        None => {
            let active = user_preferences::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                preferred_currency: Set(update.preferred_currency),
                default_city: Set(update.default_city),
                notifications_enabled: Set(update.notifications_enabled),
                updated_at: Set(now),
            };
            active.insert(db).await?
        }
    };

    info!(
        user_id = %user_id,
        currency = %saved.preferred_currency,
        "Saved user preferences"
    );
    Ok(PreferencesResponse::from(saved))
}
