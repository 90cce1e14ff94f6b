use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use common::validation::schemas::BlogCreation;
use common::{Validation, validate_form_data};
use serde_json::{Value, json};
use tracing::instrument;

use crate::extractors::json::RawJson;
use crate::models::diagnostics::{
    DiagnosticsEcho, DiagnosticsFailure, DiagnosticsReport, UtilitySample,
};
use crate::models::shared::ApiResponse;
use crate::state::AppState;

const SAMPLE_LONG_TEXT: &str =
    "This is a very long text that should be truncated to show the utility function working properly";

/// The blog every diagnostics run validates.
fn sample_blog() -> Value {
    json!({
        "title": "Test Blog Post",
        "topic": "Testing the new validation and database utilities",
        "tone": "professional",
        "style": "informative",
        "length": "medium",
    })
}

#[utoipa::path(
    get,
    path = "/diagnostics",
    tag = "Diagnostics",
    operation_id = "runDiagnostics",
    summary = "Self-check of store, helpers and validation",
    responses(
        (status = 200, description = "Diagnostics report", body = ApiResponse<DiagnosticsReport>),
    ),
)]
#[instrument(skip(state))]
pub async fn run_diagnostics(
    State(state): State<AppState>,
) -> Json<ApiResponse<DiagnosticsReport>> {
    let now = Utc::now();
    let report = DiagnosticsReport {
        timestamp: now,
        database: state.store.health().await,
        utilities: UtilitySample::new(
            now,
            SAMPLE_LONG_TEXT,
            30,
            "Test Blog Post Title",
            "hello world test",
        ),
        validation: validate_form_data::<BlogCreation>(&sample_blog()),
    };
    Json(ApiResponse::with_message(
        report,
        "Diagnostics completed successfully",
    ))
}

#[utoipa::path(
    post,
    path = "/diagnostics",
    tag = "Diagnostics",
    operation_id = "checkBlog",
    summary = "Validate a blog creation payload",
    description = "Validates the body as a new blog and runs the text helpers on its title and topic.",
    request_body = BlogCreation,
    responses(
        (status = 200, description = "Payload is valid", body = ApiResponse<DiagnosticsEcho>),
        (status = 400, description = "Payload is invalid", body = DiagnosticsFailure),
    ),
)]
#[instrument(skip(body))]
pub async fn check_blog(RawJson(body): RawJson) -> Response {
    let blog = match validate_form_data::<BlogCreation>(&body) {
        Validation::Valid(blog) => blog,
        Validation::Invalid(errors) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(DiagnosticsFailure {
                    success: false,
                    validation: errors,
                    message: "Validation failed".into(),
                }),
            )
                .into_response();
        }
    };

    let utilities = UtilitySample::new(Utc::now(), &blog.title, 20, &blog.title, &blog.topic);
    Json(ApiResponse::with_message(
        DiagnosticsEcho {
            validation: blog,
            utilities,
        },
        "Validation passed",
    ))
    .into_response()
}
