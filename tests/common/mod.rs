//! Shared fixtures for the HTTP integration tests
//!
//! The router runs against SeaORM's `MockDatabase`. Every query the handler
//! issues pops the next prepared result set, so tests queue results in the
//! order the service reads them.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{FixedOffset, NaiveDate, TimeZone};
use pricewatch_backend::{
    config::AppConfig,
    entities::{
        items, price_observations,
        sea_orm_active_enums::{Currency, Status, StoreType, Unit},
        stores, users,
    },
    routes::build_router,
    AppState,
};
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
use serde_json::Value as Json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

pub fn test_state(db: DatabaseConnection) -> AppState {
    AppState {
        db: Arc::new(db),
        config: AppConfig::default(),
    }
}

pub fn test_app(db: DatabaseConnection) -> Router {
    build_router(test_state(db))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn timestamp(hour: u32) -> sea_orm::prelude::DateTimeWithTimeZone {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 6, 1, hour, 0, 0)
        .unwrap()
}

pub fn user(id: Uuid) -> users::Model {
    users::Model {
        id,
        email: "anna@example.com".to_string(),
        display_name: "Anna".to_string(),
        status: Status::Active,
        created_at: timestamp(8),
        updated_at: timestamp(8),
    }
}

pub fn item(id: Uuid) -> items::Model {
    items::Model {
        id,
        name: "Whole milk".to_string(),
        description: None,
        unit: Unit::Liter,
        brand: Some("Alpenmilch".to_string()),
        is_favorite: false,
        status: Status::Active,
        created_at: timestamp(8),
        updated_at: timestamp(8),
    }
}

pub fn store(id: Uuid, user_id: Uuid) -> stores::Model {
    stores::Model {
        id,
        user_id,
        name: "Corner Market".to_string(),
        store_type: StoreType::Supermarket,
        city: "Vienna".to_string(),
        address: None,
        status: Status::Active,
        created_at: timestamp(8),
        updated_at: timestamp(8),
    }
}

pub fn observation(
    item_id: Uuid,
    price: Decimal,
    currency: Currency,
    observed_on: NaiveDate,
) -> price_observations::Model {
    price_observations::Model {
        id: Uuid::new_v4(),
        item_id,
        store_id: Uuid::new_v4(),
        price,
        currency,
        observation_date: observed_on,
        location: "Vienna".to_string(),
        notes: None,
        status: Status::Active,
        created_at: timestamp(9),
    }
}

/// Row shape SeaORM expects back from a `COUNT(*)` query
pub fn count_row(count: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(count)))])
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Json) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: Json) -> (StatusCode, Json) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Json) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Json::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}
