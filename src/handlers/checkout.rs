use crate::handlers::common::{created_response, map_service_error, validate_input};
use crate::services::checkout::CheckoutItem;
use crate::{errors::ApiError, AppState};
use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "items cannot be empty"))]
    pub items: Vec<CheckoutItem>,
}

/// Creates the router for the checkout endpoint
pub fn checkout_routes() -> Router<AppState> {
    Router::new().route("/", post(checkout))
}

/// Run a checkout: validate stock for every requested item, decrement
/// inventory, and record the sale with its line items, atomically.
#[utoipa::path(
    post,
    path = "/api/v1/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = crate::services::checkout::TransactionResponse),
        (status = 400, description = "Empty basket or non-positive quantity", body = crate::errors::ErrorResponse),
        (status = 404, description = "A requested product does not exist", body = crate::errors::ErrorResponse),
        (status = 409, description = "Insufficient stock for a requested item", body = crate::errors::ErrorResponse)
    ),
    tag = "Checkout"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let transaction = state
        .services
        .checkout
        .checkout(payload.items)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(transaction))
}
