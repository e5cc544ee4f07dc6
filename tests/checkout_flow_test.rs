mod common;

use axum::http::{Method, StatusCode};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;
use storefront_api::entities::transaction_detail;

use common::{read_json, TestApp};

#[tokio::test]
async fn checkout_decrements_stock_and_records_the_transaction() {
    let app = TestApp::new().await;

    let laptop = app.seed_product("Laptop", 1_000, 5, None).await;
    let mouse = app.seed_product("Mouse", 500, 2, None).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/checkout",
            Some(json!({
                "items": [
                    { "product_id": laptop, "quantity": 2 },
                    { "product_id": mouse, "quantity": 2 }
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let transaction = read_json(response).await;
    assert_eq!(transaction["total_amount"], 3_000);

    let details = transaction["details"].as_array().expect("details array");
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["product_id"].as_i64(), Some(i64::from(laptop)));
    assert_eq!(details[0]["product_name"], "Laptop");
    assert_eq!(details[0]["quantity"], 2);
    assert_eq!(details[0]["subtotal"], 2_000);
    assert_eq!(details[1]["product_name"], "Mouse");
    assert_eq!(details[1]["subtotal"], 1_000);

    assert_eq!(app.get_product(laptop).await["stock"], 3);
    assert_eq!(app.get_product(mouse).await["stock"], 0);
}

#[tokio::test]
async fn insufficient_stock_rolls_back_the_whole_basket() {
    let app = TestApp::new().await;

    let laptop = app.seed_product("Laptop", 1_000, 5, None).await;
    let mouse = app.seed_product("Mouse", 500, 2, None).await;

    // The first item would succeed on its own; the second cannot be filled.
    let response = app
        .request(
            Method::POST,
            "/api/v1/checkout",
            Some(json!({
                "items": [
                    { "product_id": laptop, "quantity": 2 },
                    { "product_id": mouse, "quantity": 3 }
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = read_json(response).await;
    let message = body["message"].as_str().expect("error message");
    assert!(message.contains("Mouse"), "message names the product: {message}");

    // Neither stock level moved and no transaction was recorded.
    assert_eq!(app.get_product(laptop).await["stock"], 5);
    assert_eq!(app.get_product(mouse).await["stock"], 2);

    let summary = app
        .request(Method::GET, "/api/v1/reports/summary", None)
        .await;
    let summary = read_json(summary).await;
    assert_eq!(summary["total_transaction_count"], 0);
}

#[tokio::test]
async fn unknown_product_fails_the_basket_with_not_found() {
    let app = TestApp::new().await;

    let laptop = app.seed_product("Laptop", 1_000, 5, None).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/checkout",
            Some(json!({
                "items": [
                    { "product_id": laptop, "quantity": 1 },
                    { "product_id": 9_999, "quantity": 1 }
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(app.get_product(laptop).await["stock"], 5);
}

#[tokio::test]
async fn empty_basket_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/checkout",
            Some(json!({ "items": [] })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_positive_quantity_is_rejected() {
    let app = TestApp::new().await;

    let laptop = app.seed_product("Laptop", 1_000, 5, None).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/checkout",
            Some(json!({
                "items": [{ "product_id": laptop, "quantity": 0 }]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.get_product(laptop).await["stock"], 5);
}

#[tokio::test]
async fn quantity_equal_to_stock_drains_the_product() {
    let app = TestApp::new().await;

    let mouse = app.seed_product("Mouse", 500, 2, None).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/checkout",
            Some(json!({
                "items": [{ "product_id": mouse, "quantity": 2 }]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.get_product(mouse).await["stock"], 0);

    // A follow-up purchase now has nothing to take.
    let response = app
        .request(
            Method::POST,
            "/api/v1/checkout",
            Some(json!({
                "items": [{ "product_id": mouse, "quantity": 1 }]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn detail_snapshot_survives_a_product_rename() {
    let app = TestApp::new().await;

    let widget = app.seed_product("Widget", 250, 10, None).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/checkout",
            Some(json!({
                "items": [{ "product_id": widget, "quantity": 1 }]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let transaction = read_json(response).await;

    // Rename the product after the sale.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/products/{widget}"),
            Some(json!({
                "name": "Widget Pro",
                "price": 250,
                "stock": 9,
                "category_id": null,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The recorded detail keeps the name as sold.
    let transaction_id = transaction["id"].as_i64().expect("transaction id") as i32;
    let details = transaction_detail::Entity::find()
        .filter(transaction_detail::Column::TransactionId.eq(transaction_id))
        .all(&*app.state.db)
        .await
        .expect("load persisted details");
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].product_name, "Widget");
}
