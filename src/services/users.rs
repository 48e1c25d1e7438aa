//! User registration and lifecycle

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::{prelude::Users, sea_orm_active_enums::Status, users};
use crate::error::ServiceError;
use crate::models::user::NewUser;
use crate::services::directory;

/// Register a new user. The email is already normalised to lowercase.
pub async fn register_user(
    db: &DatabaseConnection,
    new: NewUser,
) -> Result<users::Model, ServiceError> {
    let taken = Users::find()
        .filter(users::Column::Email.eq(new.email.as_str()))
        .one(db)
        .await?;
    if taken.is_some() {
        warn!(email = %new.email, "Registration rejected, email already in use");
        return Err(ServiceError::Conflict(format!(
            "Email '{}' is already registered",
            new.email
        )));
    }

    let now = Utc::now().fixed_offset();
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(new.email),
        display_name: Set(new.display_name),
        status: Set(Status::Active),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let saved = user.insert(db).await?;

    info!(user_id = %saved.id, "Registered user");
    Ok(saved)
}

pub async fn get_user(db: &DatabaseConnection, user_id: Uuid) -> Result<users::Model, ServiceError> {
    directory::find_active_user(db, user_id).await
}

pub async fn deactivate_user(db: &DatabaseConnection, user_id: Uuid) -> Result<(), ServiceError> {
    let existing = directory::find_active_user(db, user_id).await?;

    let mut active: users::ActiveModel = existing.into();
    active.status = Set(Status::Inactive);
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(db).await?;

    info!(user_id = %user_id, "Deactivated user");
    Ok(())
}
