use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use common::validation::schemas::{
    BlogCreation, BlogPublish, BlogSearch, BlogUpdate, ExportOptions,
};
use common::sanitize::sanitize_html;
use common::{BlogStatus, Choice, SortField, SortOrder};
use serde_json::{Map, Value};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::export::{self, ExportDocument};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::blog::SearchResponse;
use crate::models::shared::{ApiResponse, Pagination};
use crate::state::AppState;
use crate::store::{Blog, BlogChanges, BlogDetail, BlogWithMedia, NewBlog, NewUsageEvent};

/// Load a blog owned by the caller. Blogs of other users read as missing.
async fn owned_blog(
    state: &AppState,
    auth_user: &AuthUser,
    id: Uuid,
) -> Result<BlogDetail, AppError> {
    match state.store.get_blog(id).await? {
        Some(detail) if detail.blog.user_id == auth_user.user_id => Ok(detail),
        _ => Err(AppError::NotFound("Blog not found".into())),
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List the caller's blogs",
    description = "Returns every blog of the authenticated user with its media, newest first.",
    responses(
        (status = 200, description = "Blogs", body = ApiResponse<Vec<BlogWithMedia>>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Storage failure (BLOG_LIST_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn list_blogs(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BlogWithMedia>>>, AppError> {
    let blogs = state.store.list_user_blogs(auth_user.user_id).await?;
    Ok(Json(ApiResponse::ok(blogs)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blogs",
    operation_id = "createBlog",
    summary = "Create a draft blog",
    request_body = BlogCreation,
    responses(
        (status = 201, description = "Blog created as draft", body = ApiResponse<Blog>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Storage failure (BLOG_CREATE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id, title = %payload.title))]
pub async fn create_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<BlogCreation>,
) -> Result<impl IntoResponse, AppError> {
    let blog = state
        .store
        .create_blog(NewBlog {
            user_id: auth_user.user_id,
            title: payload.title,
            topic: payload.topic,
            tone: payload.tone,
            style: payload.style,
            length: payload.length,
            content: None,
            outline: None,
        })
        .await?;

    tracing::info!(blog_id = %blog.id, "Blog created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(blog))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "getBlog",
    summary = "Get a blog with its owner and media",
    params(("id" = Uuid, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog details", body = ApiResponse<BlogDetail>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn get_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BlogDetail>>, AppError> {
    let detail = owned_blog(&state, &auth_user, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "updateBlog",
    summary = "Update a blog",
    description = "Partially updates a blog; only provided fields change. `outline` accepts a list of strings or a JSON-encoded list. Status transitions are unconstrained.",
    params(("id" = Uuid, Path, description = "Blog ID")),
    request_body = BlogUpdate,
    responses(
        (status = 200, description = "Blog updated", body = ApiResponse<Blog>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (BLOG_UPDATE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id = %id))]
pub async fn update_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<BlogUpdate>,
) -> Result<Json<ApiResponse<Blog>>, AppError> {
    owned_blog(&state, &auth_user, id).await?;

    let changes = BlogChanges {
        title: payload.title,
        topic: payload.topic,
        content: payload.content.map(|c| sanitize_html(&c)),
        outline: payload.outline,
        status: payload.status,
        tags: payload.tags,
        meta_title: payload.seo_title,
        meta_description: payload.seo_description,
        ..Default::default()
    };
    let blog = state.store.update_blog(id, changes).await?;
    Ok(Json(ApiResponse::ok(blog)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog",
    description = "Deletes the blog. Its media stays in the library, detached.",
    params(("id" = Uuid, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog deleted", body = ApiResponse<Uuid>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (BLOG_DELETE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn delete_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, AppError> {
    owned_blog(&state, &auth_user, id).await?;
    state.store.delete_blog(id).await?;
    tracing::info!("Blog deleted");
    Ok(Json(ApiResponse::with_message(id, "Blog deleted")))
}

#[utoipa::path(
    post,
    path = "/{id}/publish",
    tag = "Blogs",
    operation_id = "publishBlog",
    summary = "Publish a blog",
    description = "Marks the blog published, stamping `publishedAt` with `publishDate` or now, and applies the SEO fields.",
    params(("id" = Uuid, Path, description = "Blog ID")),
    request_body = BlogPublish,
    responses(
        (status = 200, description = "Blog published", body = ApiResponse<Blog>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id = %id))]
pub async fn publish_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<BlogPublish>,
) -> Result<Json<ApiResponse<Blog>>, AppError> {
    owned_blog(&state, &auth_user, id).await?;

    let changes = BlogChanges {
        status: Some(BlogStatus::Published),
        published_at: Some(payload.publish_date.unwrap_or_else(Utc::now)),
        featured: Some(payload.featured),
        tags: payload.tags,
        meta_title: payload.seo_title,
        meta_description: payload.seo_description,
        ..Default::default()
    };
    let blog = state.store.update_blog(id, changes).await?;
    tracing::info!("Blog published");
    Ok(Json(ApiResponse::with_message(blog, "Blog published")))
}

#[utoipa::path(
    post,
    path = "/search",
    tag = "Blogs",
    operation_id = "searchBlogs",
    summary = "Search the caller's blogs",
    description = "Case-insensitive match of `query` against title, topic and content, narrowed by `filters`, then sorted and paginated.",
    request_body = BlogSearch,
    responses(
        (status = 200, description = "Matching blogs", body = ApiResponse<SearchResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(query = %payload.query))]
pub async fn search_blogs(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<BlogSearch>,
) -> Result<Json<ApiResponse<SearchResponse>>, AppError> {
    let blogs = state.store.list_user_blogs(auth_user.user_id).await?;
    Ok(Json(ApiResponse::ok(search(blogs, &payload))))
}

/// Filter, sort and paginate `blogs` according to `search`.
fn search(blogs: Vec<BlogWithMedia>, search: &BlogSearch) -> SearchResponse {
    let needle = search.query.to_lowercase();
    let mut matches: Vec<BlogWithMedia> = blogs
        .into_iter()
        .filter(|b| {
            let blog = &b.blog;
            blog.title.to_lowercase().contains(&needle)
                || blog.topic.to_lowercase().contains(&needle)
                || blog.content.to_lowercase().contains(&needle)
        })
        .filter(|b| {
            let Some(filters) = &search.filters else {
                return true;
            };
            let blog = &b.blog;
            let range = filters.date_range.as_ref();
            filters.status.is_none_or(|s| s == blog.status)
                && filters.tone.is_none_or(|t| t == blog.tone)
                && filters.style.is_none_or(|s| s == blog.style)
                && range
                    .and_then(|r| r.start)
                    .is_none_or(|start| blog.created_at >= start)
                && range
                    .and_then(|r| r.end)
                    .is_none_or(|end| blog.created_at <= end)
        })
        .collect();

    matches.sort_by(|a, b| {
        let (a, b) = (&a.blog, &b.blog);
        let ordering = match search.sort_by {
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        };
        match search.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    let pagination = Pagination::new(search.page, search.limit, matches.len() as u64);
    let blogs = matches.drain(pagination.window()).collect();
    SearchResponse { blogs, pagination }
}

#[utoipa::path(
    post,
    path = "/{id}/export",
    tag = "Blogs",
    operation_id = "exportBlog",
    summary = "Export a blog as a document",
    description = "Renders the blog as Markdown or HTML and records an `export` usage event. PDF and DOCX are rejected.",
    params(("id" = Uuid, Path, description = "Blog ID")),
    request_body = ExportOptions,
    responses(
        (status = 200, description = "Rendered document", body = ApiResponse<ExportDocument>),
        (status = 400, description = "Validation error or unsupported format (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id = %id, format = %payload.format))]
pub async fn export_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<ExportOptions>,
) -> Result<Json<ApiResponse<ExportDocument>>, AppError> {
    let detail = owned_blog(&state, &auth_user, id).await?;

    let document = export::render(&detail.blog, &payload).map_err(|format| {
        AppError::Validation(format!("Export format '{format}' is not supported"))
    })?;

    let mut details = Map::new();
    details.insert("blogId".into(), Value::String(id.to_string()));
    details.insert("format".into(), Value::String(payload.format.as_str().into()));
    let tracked = state
        .store
        .track_usage(NewUsageEvent {
            user_id: auth_user.user_id,
            action: "export".into(),
            details: Some(details),
            timestamp: Utc::now(),
        })
        .await;
    if let Err(e) = tracked {
        tracing::warn!(code = %e.code, "Export not recorded: {}", e.message);
    }

    Ok(Json(ApiResponse::ok(document)))
}
