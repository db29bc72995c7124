//! Analytics Routes - Aggregated dashboard views

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use callboard::{AnalyticsReport, Country};

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// "ES", "PT", or anything else for all calls
    pub country: Option<String>,
}

/// Aggregate analytics over the call record log
#[utoipa::path(
    get,
    path = "/api/analytics",
    params(
        ("country" = Option<String>, Query, description = "Country filter: ES or PT; any other value means all calls")
    ),
    responses(
        (status = 200, description = "Aggregated analytics report", body = AnalyticsReport),
        (status = 500, description = "Storage read failure")
    ),
    tag = "Analytics"
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsReport>, (StatusCode, String)> {
    // Unrecognized filter values (including "ALL") mean no filter
    let country = query
        .country
        .as_deref()
        .and_then(|value| value.parse::<Country>().ok());

    let report = state
        .analytics
        .analyze(country)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/analytics", get(get_analytics))
}
