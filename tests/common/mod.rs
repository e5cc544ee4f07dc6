use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    Router,
};
use serde_json::{json, Value};
use storefront_api::{config::AppConfig, db, handlers::AppServices, AppState};
use tower::ServiceExt;

/// Helper harness for spinning up an application state backed by an in-memory
/// SQLite database.
pub struct TestApp {
    router: Router,
    #[allow(dead_code)]
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        // One pooled connection keeps the in-memory database alive for the
        // lifetime of the harness and gives each test an isolated schema.
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let services = AppServices::new(db_arc.clone());

        let state = AppState {
            db: db_arc,
            config: cfg,
            services,
        };

        let router = Router::new()
            .nest("/api/v1", storefront_api::api_v1_routes())
            .with_state(state.clone());

        Self { router, state }
    }

    /// Send a JSON request against the router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Create a category via the API and return its id.
    #[allow(dead_code)]
    pub async fn seed_category(&self, name: &str) -> i32 {
        let response = self
            .request(
                Method::POST,
                "/api/v1/categories",
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201, "seeding category {name}");

        let body = read_json(response).await;
        body["id"].as_i64().expect("category id") as i32
    }

    /// Create a product via the API and return its id.
    pub async fn seed_product(
        &self,
        name: &str,
        price: i64,
        stock: i32,
        category_id: Option<i32>,
    ) -> i32 {
        let response = self
            .request(
                Method::POST,
                "/api/v1/products",
                Some(json!({
                    "name": name,
                    "price": price,
                    "stock": stock,
                    "category_id": category_id,
                })),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201, "seeding product {name}");

        let body = read_json(response).await;
        body["id"].as_i64().expect("product id") as i32
    }

    /// Fetch a product via the API.
    #[allow(dead_code)]
    pub async fn get_product(&self, id: i32) -> Value {
        let response = self
            .request(Method::GET, &format!("/api/v1/products/{id}"), None)
            .await;
        assert_eq!(response.status().as_u16(), 200, "fetching product {id}");
        read_json(response).await
    }
}

/// Deserialize a response body as JSON.
pub async fn read_json(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("parse response body as json")
}
