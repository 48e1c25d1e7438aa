mod common;

use axum::http::StatusCode;
use pricewatch_backend::entities::{
    items, price_observations, sea_orm_active_enums::Currency,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::common::{date, get, item, mock_db, observation, test_app};

fn inflation_uri(item_id: Uuid, query: &str) -> String {
    format!("/api/items/{}/inflation?{}", item_id, query)
}

/// Three observations in the window: first 2.00, last 3.00
#[tokio::test]
async fn test_inflation_calculated_over_window() {
    let item_id = Uuid::new_v4();
    let db = mock_db()
        .append_query_results([vec![item(item_id)]])
        .append_query_results([vec![
            observation(item_id, dec!(2.00), Currency::Eur, date(2024, 1, 10)),
            observation(item_id, dec!(2.50), Currency::Eur, date(2024, 2, 10)),
            observation(item_id, dec!(3.00), Currency::Eur, date(2024, 3, 10)),
        ]])
        .into_connection();

    let (status, json) = get(
        test_app(db),
        &inflation_uri(item_id, "currency=EUR&start_date=2024-01-01&end_date=2024-03-31"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "CALCULATED");
    assert_eq!(json["currency"], "EUR");
    assert_eq!(json["startDate"], "2024-01-01");
    assert_eq!(json["endDate"], "2024-03-31");
    assert_eq!(json["firstObservationDate"], "2024-01-10");
    assert_eq!(json["lastObservationDate"], "2024-03-10");
    assert_eq!(json["startedPrice"], "2.00");
    assert_eq!(json["lastPrice"], "3.00");
    assert_eq!(json["priceDifference"], "1.00");
    assert_eq!(json["inflationRate"], "50.00");
    assert_eq!(json["observationCount"], 3);
}

#[tokio::test]
async fn test_inflation_negative_rate() {
    let item_id = Uuid::new_v4();
    let db = mock_db()
        .append_query_results([vec![item(item_id)]])
        .append_query_results([vec![
            observation(item_id, dec!(4.00), Currency::Usd, date(2024, 1, 1)),
            observation(item_id, dec!(3.00), Currency::Usd, date(2024, 1, 31)),
        ]])
        .into_connection();

    let (status, json) = get(
        test_app(db),
        &inflation_uri(item_id, "currency=usd&start_date=2024-01-01&end_date=2024-01-31"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "CALCULATED");
    assert_eq!(json["inflationRate"], "-25.00");
}

#[tokio::test]
async fn test_inflation_single_observation_is_insufficient() {
    let item_id = Uuid::new_v4();
    let db = mock_db()
        .append_query_results([vec![item(item_id)]])
        .append_query_results([vec![observation(
            item_id,
            dec!(1.99),
            Currency::Eur,
            date(2024, 5, 5),
        )]])
        .into_connection();

    let (status, json) = get(
        test_app(db),
        &inflation_uri(item_id, "currency=EUR&start_date=2024-05-01&end_date=2024-05-31"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "INSUFFICIENT_DATA");
    assert!(json["message"].as_str().unwrap().contains("EUR"));
    assert!(json.get("inflationRate").is_none());
}

#[tokio::test]
async fn test_inflation_no_observations_is_insufficient() {
    let item_id = Uuid::new_v4();
    let db = mock_db()
        .append_query_results([vec![item(item_id)]])
        .append_query_results([Vec::<price_observations::Model>::new()])
        .into_connection();

    let (status, json) = get(
        test_app(db),
        &inflation_uri(item_id, "currency=EUR&start_date=2024-05-01&end_date=2024-05-31"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "INSUFFICIENT_DATA");
}

#[tokio::test]
async fn test_inflation_unknown_item_returns_404() {
    let db = mock_db()
        .append_query_results([Vec::<items::Model>::new()])
        .into_connection();

    let (status, json) = get(
        test_app(db),
        &inflation_uri(
            Uuid::new_v4(),
            "currency=EUR&start_date=2024-01-01&end_date=2024-12-31",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_inflation_rejects_unsupported_currency() {
    let (status, json) = get(
        test_app(mock_db().into_connection()),
        &inflation_uri(
            Uuid::new_v4(),
            "currency=GBP&start_date=2024-01-01&end_date=2024-12-31",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_FAILED");
    assert!(json["error"].as_str().unwrap().contains("GBP"));
}

#[tokio::test]
async fn test_inflation_rejects_start_after_end() {
    let (status, json) = get(
        test_app(mock_db().into_connection()),
        &inflation_uri(
            Uuid::new_v4(),
            "currency=EUR&start_date=2024-06-01&end_date=2024-01-01",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_inflation_requires_currency() {
    let (status, json) = get(
        test_app(mock_db().into_connection()),
        &inflation_uri(Uuid::new_v4(), "start_date=2024-01-01&end_date=2024-12-31"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "currency is required");
}

#[tokio::test]
async fn test_inflation_malformed_date_uses_validation_body() {
    let (status, json) = get(
        test_app(mock_db().into_connection()),
        &inflation_uri(
            Uuid::new_v4(),
            "currency=EUR&start_date=2024-13-45&end_date=2024-12-31",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_FAILED");
    assert!(!json["error"].as_str().unwrap().is_empty());
}
