use crate::handlers::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::services::products::{CreateProductRequest, UpdateProductRequest};
use crate::{errors::ApiError, AppState};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};

/// Creates the router for product endpoints
pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// List all products with their categories
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "All products", body = [crate::services::products::ProductResponse])
    ),
    tag = "Products"
)]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = state
        .services
        .products
        .list()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(products))
}

/// Fetch a single product by id
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = crate::services::products::ProductResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .services
        .products
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(product))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = crate::services::products::ProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let product = state
        .services
        .products
        .create(payload)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(product))
}

/// Update an existing product
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = crate::services::products::ProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let product = state
        .services
        .products
        .update(id, payload)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .products
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}
