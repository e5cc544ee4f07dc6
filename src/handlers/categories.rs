use crate::handlers::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::services::categories::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::{errors::ApiError, AppState};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};

/// Creates the router for category endpoints
pub fn categories_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

/// List all categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "All categories", body = [crate::services::categories::CategoryResponse])
    ),
    tag = "Categories"
)]
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = state
        .services
        .categories
        .list()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(categories))
}

/// Fetch a single category by id
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = crate::services::categories::CategoryResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .services
        .categories
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(category))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = crate::services::categories::CategoryResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let category = state
        .services
        .categories
        .create(payload)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(category))
}

/// Update an existing category
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = crate::services::categories::CategoryResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let category = state
        .services
        .categories
        .update(id, payload)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(category))
}

/// Delete a category; products referencing it are detached, not deleted
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .categories
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}
