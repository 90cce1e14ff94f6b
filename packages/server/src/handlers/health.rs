use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::instrument;

use crate::models::shared::ApiResponse;
use crate::state::AppState;
use crate::store::HealthReport;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "health",
    summary = "Check the backing store",
    description = "Runs a trivial query and counts users, blogs and media.",
    responses(
        (status = 200, description = "Store reachable", body = ApiResponse<HealthReport>),
        (status = 503, description = "Store unreachable", body = ApiResponse<HealthReport>),
    ),
)]
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.store.health().await;
    let healthy = report.is_healthy();
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(ApiResponse {
            success: healthy,
            data: report,
            message: None,
        }),
    )
}
