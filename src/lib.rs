// src/lib.rs

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: AppConfig,
}

pub mod entities {
    pub mod prelude;
    pub mod sea_orm_active_enums;
    pub mod categories;
    pub mod inflation_reports;
    pub mod item_categories;
    pub mod items;
    pub mod price_alerts;
    pub mod price_observations;
    pub mod shopping_list_items;
    pub mod shopping_lists;
    pub mod stores;
    pub mod user_preferences;
    pub mod users;
}

pub mod services {
    pub mod directory;
    pub mod price_filter;
    pub mod inflation;
    pub mod price_observations;
    pub mod items;
    pub mod categories;
    pub mod stores;
    pub mod users;
    pub mod user_preferences;
    pub mod shopping_lists;
    pub mod price_alerts;
    pub mod inflation_reports;
}

pub mod config;
pub mod error;
pub mod models;
pub mod handlers;
pub mod routes;
