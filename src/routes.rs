use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    categories, health, inflation, inflation_reports, items, price_alerts, prices,
    shopping_lists, stores, users,
};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Users
        .route("/api/users", post(users::register_user))
        .route(
            "/api/users/{id}",
            get(users::get_user).delete(users::deactivate_user),
        )
        .route(
            "/api/users/{id}/preferences",
            get(users::get_preferences).put(users::update_preferences),
        )
        // Stores
        .route(
            "/api/users/{id}/stores",
            post(stores::create_store).get(stores::list_user_stores),
        )
        .route(
            "/api/users/{id}/stores/{store_id}",
            delete(stores::deactivate_store),
        )
        .route("/api/stores/{id}", get(stores::get_store))
        // Categories
        .route(
            "/api/categories",
            post(categories::create_category).get(categories::list_categories),
        )
        .route(
            "/api/categories/{id}",
            delete(categories::deactivate_category),
        )
        .route("/api/categories/{id}/items", get(categories::list_category_items))
        // Items
        .route("/api/items", post(items::create_item).get(items::list_items))
        .route(
            "/api/items/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::deactivate_item),
        )
        .route("/api/items/{id}/favorite", put(items::set_favorite))
        .route("/api/items/{id}/categories", get(categories::list_item_categories))
        .route(
            "/api/items/{id}/categories/{category_id}",
            put(categories::assign_category).delete(categories::unassign_category),
        )
        // Prices and inflation
        .route("/api/prices", post(prices::record_price).get(prices::search_prices))
        .route(
            "/api/prices/{id}",
            get(prices::get_price)
                .patch(prices::update_price_notes)
                .delete(prices::deactivate_price),
        )
        .route("/api/items/{id}/prices/latest", get(prices::get_latest_price))
        .route("/api/items/{id}/inflation", get(inflation::get_item_inflation))
        // Shopping lists
        .route(
            "/api/users/{id}/shopping-lists",
            post(shopping_lists::create_list).get(shopping_lists::list_user_lists),
        )
        .route(
            "/api/shopping-lists/{id}",
            get(shopping_lists::get_list).delete(shopping_lists::deactivate_list),
        )
        .route("/api/shopping-lists/{id}/items", post(shopping_lists::add_entry))
        .route(
            "/api/shopping-lists/{id}/items/{entry_id}",
            delete(shopping_lists::remove_entry),
        )
        .route(
            "/api/shopping-lists/{id}/items/{entry_id}/check",
            put(shopping_lists::set_entry_checked),
        )
        // Alerts
        .route(
            "/api/users/{id}/alerts",
            post(price_alerts::create_alert).get(price_alerts::list_alerts),
        )
        .route(
            "/api/users/{id}/alerts/evaluate",
            get(price_alerts::evaluate_alerts),
        )
        .route(
            "/api/users/{id}/alerts/{alert_id}",
            delete(price_alerts::deactivate_alert),
        )
        // Inflation reports
        .route(
            "/api/users/{id}/inflation-reports",
            post(inflation_reports::generate_report).get(inflation_reports::list_reports),
        )
        .route("/api/inflation-reports/{id}", get(inflation_reports::get_report))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
