mod v1;

use axum::{Router, routing::get};
use utoipa_axum::router::OpenApiRouter;

use crate::config::AppConfig;
use crate::gate::{DASHBOARD_PATH, SIGN_IN_PATH};
use crate::handlers::pages;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/v1", v1::routes(config))
}

/// Browser pages. These are not part of the documented API.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route(SIGN_IN_PATH, get(pages::sign_in))
        .route(DASHBOARD_PATH, get(pages::dashboard))
}
