use axum::{
    Json,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::validation::schemas::{
    AiGeneration, BlogCreation, BlogPublish, BlogSearch, BlogUpdate, ExportOptions,
    ImageGeneration, MediaUpload, UsageEventInput, UserProfile, UserSettings,
};
use common::{Schema, validate_form_data};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::RawJson;

/// Names accepted by [`validate_schema`].
pub const SCHEMA_NAMES: &[&str] = &[
    "user-profile",
    "user-settings",
    "blog-creation",
    "blog-update",
    "blog-publish",
    "ai-generation",
    "image-generation",
    "media-upload",
    "blog-search",
    "export-options",
    "usage-event",
];

fn outcome<T: Schema + Serialize>(data: &Value) -> Response {
    let validation = validate_form_data::<T>(data);
    let status = if validation.is_valid() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(validation)).into_response()
}

#[utoipa::path(
    post,
    path = "/{schema}",
    tag = "Validation",
    operation_id = "validateSchema",
    summary = "Validate a payload against a named schema",
    description = "Returns `{success: true, data}` with defaults applied, or `{success: false, errors}` listing every failed field as `field: message`.",
    params(("schema" = String, Path, description = "Schema name, e.g. `blog-creation`")),
    request_body(content_type = "application/json", description = "Payload to validate"),
    responses(
        (status = 200, description = "Payload is valid"),
        (status = 400, description = "Payload is invalid"),
        (status = 404, description = "Unknown schema (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(body))]
pub async fn validate_schema(
    Path(schema): Path<String>,
    RawJson(body): RawJson,
) -> Result<Response, AppError> {
    let response = match schema.as_str() {
        "user-profile" => outcome::<UserProfile>(&body),
        "user-settings" => outcome::<UserSettings>(&body),
        "blog-creation" => outcome::<BlogCreation>(&body),
        "blog-update" => outcome::<BlogUpdate>(&body),
        "blog-publish" => outcome::<BlogPublish>(&body),
        "ai-generation" => outcome::<AiGeneration>(&body),
        "image-generation" => outcome::<ImageGeneration>(&body),
        "media-upload" => outcome::<MediaUpload>(&body),
        "blog-search" => outcome::<BlogSearch>(&body),
        "export-options" => outcome::<ExportOptions>(&body),
        "usage-event" => outcome::<UsageEventInput>(&body),
        other => {
            return Err(AppError::NotFound(format!(
                "Unknown schema '{other}'. Known schemas: {}",
                SCHEMA_NAMES.join(", ")
            )));
        }
    };
    Ok(response)
}
