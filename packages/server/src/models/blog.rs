use serde::Serialize;

use crate::models::shared::Pagination;
use crate::store::BlogWithMedia;

/// One page of blog search results.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SearchResponse {
    pub blogs: Vec<BlogWithMedia>,
    pub pagination: Pagination,
}
