use crate::handlers::common::{map_service_error, success_response};
use crate::{errors::ApiError, AppState};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SummaryQuery {
    /// Inclusive start of the reporting range (YYYY-MM-DD, local calendar day)
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of the reporting range (YYYY-MM-DD, local calendar day)
    pub end_date: Option<NaiveDate>,
}

/// Creates the router for report endpoints
pub fn reports_routes() -> Router<AppState> {
    Router::new().route("/summary", get(sales_summary))
}

/// Sales summary over a date range; defaults to the current day
#[utoipa::path(
    get,
    path = "/api/v1/reports/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Sales summary", body = crate::services::reports::ReportSummary),
        (status = 400, description = "start_date after end_date", body = crate::errors::ErrorResponse)
    ),
    tag = "Reports"
)]
pub async fn sales_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state
        .services
        .reports
        .get_summary(query.start_date, query.end_date)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(summary))
}
