mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{read_json, TestApp};

#[tokio::test]
async fn category_crud_round_trip() {
    let app = TestApp::new().await;

    // Create
    let response = app
        .request(
            Method::POST,
            "/api/v1/categories",
            Some(json!({ "name": "Electronics", "description": "Gadgets" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    let id = created["id"].as_i64().expect("category id");
    assert_eq!(created["name"], "Electronics");

    // Read
    let response = app
        .request(Method::GET, &format!("/api/v1/categories/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Update
    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/categories/{id}"),
            Some(json!({ "name": "Consumer Electronics", "description": null })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["name"], "Consumer Electronics");
    assert!(updated["description"].is_null());

    // List
    let response = app.request(Method::GET, "/api/v1/categories", None).await;
    let list = read_json(response).await;
    assert_eq!(list.as_array().expect("category list").len(), 1);

    // Delete
    let response = app
        .request(Method::DELETE, &format!("/api/v1/categories/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(Method::GET, &format!("/api/v1/categories/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn category_validation_and_missing_ids() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::POST, "/api/v1/categories", Some(json!({ "name": "" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(Method::GET, "/api/v1/categories/42", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(Method::DELETE, "/api/v1/categories/42", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_crud_round_trip_with_category() {
    let app = TestApp::new().await;

    let category = app.seed_category("Peripherals").await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({
                "name": "Keyboard",
                "price": 4_500,
                "stock": 10,
                "category_id": category,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    let id = created["id"].as_i64().expect("product id");
    assert_eq!(created["category"]["name"], "Peripherals");

    // Update detaches the category and adjusts the price.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/products/{id}"),
            Some(json!({
                "name": "Keyboard",
                "price": 4_000,
                "stock": 10,
                "category_id": null,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["price"], 4_000);
    assert!(updated["category_id"].is_null());

    let response = app
        .request(Method::DELETE, &format!("/api/v1/products/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(Method::GET, &format!("/api/v1/products/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_rejects_unknown_category_and_negative_values() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({
                "name": "Orphan",
                "price": 100,
                "stock": 1,
                "category_id": 999,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Freebie", "price": -1, "stock": 1 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Backorder", "price": 100, "stock": -5 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_category_detaches_its_products() {
    let app = TestApp::new().await;

    let category = app.seed_category("Doomed").await;
    let product = app.seed_product("Survivor", 100, 1, Some(category)).await;

    let response = app
        .request(Method::DELETE, &format!("/api/v1/categories/{category}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let survivor = app.get_product(product).await;
    assert!(survivor["category_id"].is_null());
}
