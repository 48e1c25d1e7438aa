mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use pricewatch_backend::{
    entities::{
        categories, items, price_alerts, price_observations,
        sea_orm_active_enums::{Currency, Status},
        shopping_lists, users,
    },
    routes::build_router,
};
use rust_decimal_macros::dec;
use sea_orm::MockExecResult;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::common::{
    date, get, item, mock_db, observation, post_json, send, test_app, test_state, timestamp,
    user,
};

#[tokio::test]
async fn test_health_reports_database_up() {
    let db = mock_db()
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let (status, json) = get(test_app(db), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "up");
}

#[tokio::test]
async fn test_register_user() {
    let user_id = Uuid::new_v4();
    let db = mock_db()
        .append_query_results([Vec::<users::Model>::new()])
        .append_query_results([vec![user(user_id)]])
        .into_connection();

    let (status, json) = post_json(
        test_app(db),
        "/api/users",
        json!({ "email": "Anna@Example.com", "displayName": "Anna" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["id"], user_id.to_string());
    assert_eq!(json["email"], "anna@example.com");
}

#[tokio::test]
async fn test_register_user_with_taken_email_conflicts() {
    let db = mock_db()
        .append_query_results([vec![user(Uuid::new_v4())]])
        .into_connection();

    let (status, json) = post_json(
        test_app(db),
        "/api/users",
        json!({ "email": "anna@example.com", "displayName": "Anna" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_user_rejects_malformed_email() {
    let (status, _) = post_json(
        test_app(mock_db().into_connection()),
        "/api/users",
        json!({ "email": "not-an-email", "displayName": "Anna" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_preferences_default_when_never_saved() {
    let user_id = Uuid::new_v4();
    let db = mock_db()
        .append_query_results([vec![user(user_id)]])
        .append_query_results([Vec::<pricewatch_backend::entities::user_preferences::Model>::new()])
        .into_connection();

    let (status, json) = get(test_app(db), &format!("/api/users/{}/preferences", user_id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["preferredCurrency"], "EUR");
    assert_eq!(json["notificationsEnabled"], true);
}

#[tokio::test]
async fn test_duplicate_category_name_conflicts() {
    let existing = categories::Model {
        id: Uuid::new_v4(),
        name: "Dairy".to_string(),
        description: None,
        status: Status::Active,
        created_at: timestamp(8),
        updated_at: timestamp(8),
    };
    let db = mock_db()
        .append_query_results([vec![existing]])
        .into_connection();

    let (status, _) = post_json(test_app(db), "/api/categories", json!({ "name": "dairy" })).await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_deactivate_shopping_list_runs_in_transaction() {
    let list = shopping_lists::Model {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: "Weekend".to_string(),
        status: Status::Active,
        created_at: timestamp(8),
        updated_at: timestamp(8),
    };
    let mut deactivated = list.clone();
    deactivated.status = Status::Inactive;

    let db = mock_db()
        .append_query_results([vec![list.clone()]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 3,
        }])
        .append_query_results([vec![deactivated]])
        .into_connection();

    let (status, _) = send(
        test_app(db),
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/shopping-lists/{}", list.id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_shopping_list_rejects_zero_quantity() {
    let (status, json) = post_json(
        test_app(mock_db().into_connection()),
        &format!("/api/shopping-lists/{}/items", Uuid::new_v4()),
        json!({ "itemId": Uuid::new_v4(), "quantity": "0" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_evaluate_alerts_against_latest_price() {
    let user_id = Uuid::new_v4();
    let item_id = Uuid::new_v4();
    let alert = price_alerts::Model {
        id: Uuid::new_v4(),
        user_id,
        item_id,
        target_price: dec!(2.00),
        currency: Currency::Eur,
        status: Status::Active,
        created_at: timestamp(8),
    };

    let db = mock_db()
        .append_query_results([vec![user(user_id)]])
        .append_query_results([vec![alert.clone()]])
        .append_query_results([vec![observation(
            item_id,
            dec!(1.80),
            Currency::Eur,
            date(2024, 6, 1),
        )]])
        .into_connection();

    let (status, json) = get(test_app(db), &format!("/api/users/{}/alerts/evaluate", user_id)).await;

    assert_eq!(status, StatusCode::OK);
    let evaluations = json.as_array().unwrap();
    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0]["alertId"], alert.id.to_string());
    assert_eq!(evaluations[0]["latestPrice"], "1.80");
    assert_eq!(evaluations[0]["triggered"], true);
}

#[tokio::test]
async fn test_insufficient_report_is_not_stored() {
    let user_id = Uuid::new_v4();
    let item_id = Uuid::new_v4();
    let db = mock_db()
        .append_query_results([vec![user(user_id)]])
        .append_query_results([vec![item(item_id)]])
        .append_query_results([Vec::<price_observations::Model>::new()])
        .into_connection();

    let (status, json) = post_json(
        test_app(db),
        &format!("/api/users/{}/inflation-reports", user_id),
        json!({
            "itemId": item_id,
            "currency": "EUR",
            "startDate": "2024-01-01",
            "endDate": "2024-12-31"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"]["status"], "INSUFFICIENT_DATA");
    assert!(json.get("report").is_none());
}

#[tokio::test]
async fn test_deactivated_item_is_not_found() {
    let db = mock_db()
        .append_query_results([Vec::<items::Model>::new()])
        .into_connection();

    let (status, json) = get(test_app(db), &format!("/api/items/{}", Uuid::new_v4())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_cloned_state_shares_one_connection() {
    let item_id = Uuid::new_v4();
    let db = mock_db()
        .append_query_results([vec![item(item_id)]])
        .append_query_results([vec![item(item_id)]])
        .into_connection();

    let state = test_state(db);
    let copy = state.clone();
    assert!(Arc::ptr_eq(&state.db, &copy.db));

    let app = build_router(state);
    let uri = format!("/api/items/{}", item_id);
    let (first, _) = get(app.clone(), &uri).await;
    let (second, json) = get(app, &uri).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(json["id"], item_id.to_string());
}
