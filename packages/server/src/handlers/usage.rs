use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::validation::schemas::UsageEventInput;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::shared::ApiResponse;
use crate::models::usage::{DEFAULT_STATS_DAYS, MAX_STATS_DAYS, UsageStats, UsageStatsQuery};
use crate::state::AppState;
use crate::store::{NewUsageEvent, UsageEvent};

#[utoipa::path(
    post,
    path = "/",
    tag = "Usage",
    operation_id = "trackUsage",
    summary = "Record a usage event",
    request_body = UsageEventInput,
    responses(
        (status = 201, description = "Event recorded", body = ApiResponse<UsageEvent>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Storage failure (USAGE_TRACK_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id, action = %payload.action))]
pub async fn track_usage(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UsageEventInput>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .store
        .track_usage(NewUsageEvent {
            user_id: auth_user.user_id,
            action: payload.action,
            details: payload.details,
            timestamp: payload.timestamp,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(event))))
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "Usage",
    operation_id = "usageStats",
    summary = "Count the caller's usage events per action",
    params(UsageStatsQuery),
    responses(
        (status = 200, description = "Counts per action", body = ApiResponse<UsageStats>),
        (status = 400, description = "Days out of range (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Storage failure (USAGE_STATS_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = %auth_user.user_id))]
pub async fn usage_stats(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<UsageStatsQuery>,
) -> Result<Json<ApiResponse<UsageStats>>, AppError> {
    let days = query.days.unwrap_or(DEFAULT_STATS_DAYS);
    if !(1..=MAX_STATS_DAYS).contains(&days) {
        return Err(AppError::Validation(format!(
            "days must be between 1 and {MAX_STATS_DAYS}"
        )));
    }

    let actions = state.store.usage_stats(auth_user.user_id, days).await?;
    let total = actions.iter().map(|a| a.count).sum();
    Ok(Json(ApiResponse::ok(UsageStats {
        days,
        total,
        actions,
    })))
}
