use utoipa_axum::{router::OpenApiRouter, routes};

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/blogs", blog_routes())
        .nest("/media", media_routes(config.media.max_upload_bytes))
        .nest("/usage", usage_routes())
        .nest("/validate", validate_routes())
        .routes(routes!(handlers::health::health))
        .routes(routes!(
            handlers::diagnostics::run_diagnostics,
            handlers::diagnostics::check_blog
        ))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::logout))
        .routes(routes!(handlers::auth::me))
}

fn blog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::blog::list_blogs,
            handlers::blog::create_blog
        ))
        .routes(routes!(handlers::blog::search_blogs))
        .routes(routes!(
            handlers::blog::get_blog,
            handlers::blog::update_blog,
            handlers::blog::delete_blog
        ))
        .routes(routes!(handlers::blog::publish_blog))
        .routes(routes!(handlers::blog::export_blog))
}

fn media_routes(max_upload_bytes: usize) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::media::list_media,
            handlers::media::upload_media
        ))
        .routes(routes!(handlers::media::delete_media))
        .layer(handlers::media::upload_body_limit(max_upload_bytes))
}

fn usage_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::usage::track_usage))
        .routes(routes!(handlers::usage::usage_stats))
}

fn validate_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::validate::validate_schema))
}
