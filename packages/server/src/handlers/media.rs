use axum::{
    Json,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::validation::schemas::MediaUpload;
use common::{Validation, validate_form_data};
use serde_json::{Map, Value, json};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::media::{FileUpload, UploadOutcome, UrlOptions};
use crate::models::shared::ApiResponse;
use crate::state::AppState;
use crate::store::{Media, NewMedia};

/// Multipart overhead allowed on top of the file itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Body limit layer for the upload route.
pub fn upload_body_limit(max_upload_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_upload_bytes + FORM_OVERHEAD_BYTES)
}

/// Raw parts of an upload form before validation.
#[derive(Default)]
struct UploadForm {
    file: Option<FileUpload>,
    fields: Map<String, Value>,
}

/// Tags arrive either as a JSON array or as a comma-separated list.
fn parse_tags(raw: &str) -> Value {
    if let Ok(value @ Value::Array(_)) = serde_json::from_str::<Value>(raw) {
        return value;
    }
    Value::Array(
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| Value::String(t.to_string()))
            .collect(),
    )
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .map(str::to_owned)
                    .unwrap_or_else(|| {
                        mime_guess::from_path(&filename)
                            .first_or_octet_stream()
                            .to_string()
                    });
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {}", e)))?;
                form.file = Some(FileUpload {
                    filename,
                    content_type,
                    data: data.to_vec(),
                });
            }
            "type" | "blogId" | "description" | "tags" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid field '{name}': {}", e)))?;
                let value = if name == "tags" {
                    parse_tags(&text)
                } else {
                    Value::String(text)
                };
                form.fields.insert(name, value);
            }
            _ => {}
        }
    }

    Ok(form)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Media",
    operation_id = "listMedia",
    summary = "List the caller's media",
    responses(
        (status = 200, description = "Media, newest first", body = ApiResponse<Vec<Media>>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Storage failure (MEDIA_LIST_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn list_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Media>>>, AppError> {
    let media = state.store.list_user_media(auth_user.user_id).await?;
    Ok(Json(ApiResponse::ok(media)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Media",
    operation_id = "uploadMedia",
    summary = "Upload a file to the media library",
    description = "Multipart form with `file`, `type` (image, video, document) and optional `blogId`, `description` and `tags` (JSON array or comma-separated). The file is pushed to the image host before the record is stored.",
    request_body(content_type = "multipart/form-data", description = "Upload form"),
    responses(
        (status = 201, description = "Media stored", body = ApiResponse<Media>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Target blog not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Image host rejected the upload (UPLOAD_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(user_id = %auth_user.user_id))]
pub async fn upload_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_form(multipart).await?;

    let upload = match validate_form_data::<MediaUpload>(&Value::Object(form.fields)) {
        Validation::Valid(upload) => upload,
        Validation::Invalid(errors) => return Err(AppError::InvalidFields(errors)),
    };

    let file = form
        .file
        .filter(|f| !f.data.is_empty())
        .ok_or_else(|| AppError::InvalidFields(vec!["file: Required".into()]))?;

    let max = state.config.media.max_upload_bytes;
    if file.data.len() > max {
        return Err(AppError::InvalidFields(vec![format!(
            "file: File must be at most {max} bytes"
        )]));
    }

    let blog_id = match upload.blog_id.as_deref() {
        None => None,
        Some(raw) => {
            let id = Uuid::parse_str(raw)
                .map_err(|_| AppError::InvalidFields(vec!["blogId: Invalid blog id".into()]))?;
            match state.store.get_blog(id).await? {
                Some(detail) if detail.blog.user_id == auth_user.user_id => Some(id),
                _ => return Err(AppError::NotFound("Blog not found".into())),
            }
        }
    };

    let filename = file.filename.clone();
    let mime_type = file.content_type.clone();
    let size = file.data.len() as i64;

    let asset = match state.images.upload(file, &state.config.media.folder).await {
        UploadOutcome::Uploaded(asset) => asset,
        UploadOutcome::Failed { error } => return Err(AppError::UploadFailed(error)),
    };

    let mut metadata = Map::new();
    metadata.insert("publicId".into(), json!(asset.public_id));
    metadata.insert("width".into(), json!(asset.width));
    metadata.insert("height".into(), json!(asset.height));
    metadata.insert("format".into(), json!(asset.format));
    metadata.insert(
        "thumbnailUrl".into(),
        json!(
            state
                .images
                .optimized_url(&asset.public_id, &UrlOptions::default())
        ),
    );
    if let Some(description) = upload.description {
        metadata.insert("description".into(), json!(description));
    }
    if let Some(tags) = upload.tags {
        metadata.insert("tags".into(), json!(tags));
    }

    let public_id = asset.public_id;
    let created = state
        .store
        .create_media(NewMedia {
            user_id: auth_user.user_id,
            blog_id,
            kind: upload.kind,
            url: asset.url,
            filename,
            size,
            mime_type,
            metadata,
        })
        .await;
    let media = match created {
        Ok(media) => media,
        Err(e) => {
            // The row was never written; drop the hosted copy with it.
            if !state.images.destroy(&public_id).await.success {
                tracing::warn!(public_id = %public_id, "Failed to destroy orphaned upload");
            }
            return Err(e.into());
        }
    };

    tracing::info!(media_id = %media.id, "Media uploaded");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(media))))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Media",
    operation_id = "deleteMedia",
    summary = "Delete a media item",
    description = "Removes the record, then asks the image host to destroy the asset. A failed destroy is logged and does not fail the request.",
    params(("id" = Uuid, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Media deleted", body = ApiResponse<Uuid>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Media not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (MEDIA_DELETE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn delete_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, AppError> {
    let media = match state.store.get_media(id).await? {
        Some(media) if media.user_id == auth_user.user_id => media,
        _ => return Err(AppError::NotFound("Media not found".into())),
    };

    state.store.delete_media(id).await?;

    if let Some(public_id) = media.public_id() {
        let outcome = state.images.destroy(public_id).await;
        if !outcome.success {
            tracing::warn!(public_id, "Hosted asset was not destroyed");
        }
    }

    Ok(Json(ApiResponse::with_message(id, "Media deleted")))
}
