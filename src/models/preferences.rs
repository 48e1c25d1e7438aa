//! User preference models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::Currency, user_preferences};
use crate::models::optional_text;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    pub preferred_currency: String,
    #[serde(default)]
    pub default_city: Option<String>,
    #[serde(default = "default_notifications")]
    pub notifications_enabled: bool,
}

fn default_notifications() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesUpdate {
    pub preferred_currency: Currency,
    pub default_city: Option<String>,
    pub notifications_enabled: bool,
}

impl UpdatePreferencesRequest {
    pub fn validate(&self) -> Result<PreferencesUpdate, String> {
        Ok(PreferencesUpdate {
            preferred_currency: self.preferred_currency.parse()?,
            default_city: optional_text("defaultCity", self.default_city.as_deref(), 100)?,
            notifications_enabled: self.notifications_enabled,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesResponse {
    pub user_id: Uuid,
    pub preferred_currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_city: Option<String>,
    pub notifications_enabled: bool,
}

impl PreferencesResponse {
    /// Preferences for a user who never saved any
    pub fn defaults_for(user_id: Uuid) -> Self {
        Self {
            user_id,
            preferred_currency: Currency::Eur,
            default_city: None,
            notifications_enabled: true,
        }
    }
}

impl From<user_preferences::Model> for PreferencesResponse {
    fn from(model: user_preferences::Model) -> Self {
        Self {
            user_id: model.user_id,
            preferred_currency: model.preferred_currency,
            default_city: model.default_city,
            notifications_enabled: model.notifications_enabled,
        }
    }
}
