//! Call Routes - Record Ingestion

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use callboard::CallRecord;

use crate::models::CreateCallRequest;
use crate::AppState;

/// Ingest one call record
#[utoipa::path(
    post,
    path = "/api/calls",
    request_body = CreateCallRequest,
    responses(
        (status = 201, description = "Record persisted", body = CallRecord),
        (status = 500, description = "Storage failure, nothing persisted")
    ),
    tag = "Calls"
)]
pub async fn create_call(
    State(state): State<AppState>,
    Json(payload): Json<CreateCallRequest>,
) -> Result<(StatusCode, Json<CallRecord>), (StatusCode, String)> {
    let record = state
        .ingest
        .ingest(payload.into_new_record())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/calls", post(create_call))
}
