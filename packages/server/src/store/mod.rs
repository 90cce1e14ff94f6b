//! Persistence adapter.
//!
//! [`ContentStore`] has one method per storage operation. Every failure is a
//! [`StoreError`] whose [`StoreErrorCode`] names the operation that failed;
//! nothing is retried and no operation spans a transaction.

mod memory;
mod records;
mod sql;

use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use records::*;
pub use sql::SqlStore;

/// Stable machine-readable code identifying the failed operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreErrorCode {
    UserCreate,
    UserGet,
    BlogCreate,
    BlogGet,
    BlogList,
    BlogUpdate,
    BlogDelete,
    MediaCreate,
    MediaGet,
    MediaList,
    MediaDelete,
    UsageTrack,
    UsageStats,
}

impl StoreErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserCreate => "USER_CREATE_ERROR",
            Self::UserGet => "USER_GET_ERROR",
            Self::BlogCreate => "BLOG_CREATE_ERROR",
            Self::BlogGet => "BLOG_GET_ERROR",
            Self::BlogList => "BLOG_LIST_ERROR",
            Self::BlogUpdate => "BLOG_UPDATE_ERROR",
            Self::BlogDelete => "BLOG_DELETE_ERROR",
            Self::MediaCreate => "MEDIA_CREATE_ERROR",
            Self::MediaGet => "MEDIA_GET_ERROR",
            Self::MediaList => "MEDIA_LIST_ERROR",
            Self::MediaDelete => "MEDIA_DELETE_ERROR",
            Self::UsageTrack => "USAGE_TRACK_ERROR",
            Self::UsageStats => "USAGE_STATS_ERROR",
        }
    }

    fn operation(&self) -> &'static str {
        match self {
            Self::UserCreate => "create user",
            Self::UserGet => "get user",
            Self::BlogCreate => "create blog",
            Self::BlogGet => "get blog",
            Self::BlogList => "get user blogs",
            Self::BlogUpdate => "update blog",
            Self::BlogDelete => "delete blog",
            Self::MediaCreate => "create media",
            Self::MediaGet => "get media",
            Self::MediaList => "get user media",
            Self::MediaDelete => "delete media",
            Self::UsageTrack => "track usage",
            Self::UsageStats => "get usage stats",
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a store operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend rejected or could not run the operation.
    Backend,
    /// The record to update or delete does not exist.
    NotFound,
    /// A uniqueness constraint was violated.
    Conflict,
}

/// The single error type raised by every [`ContentStore`] operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub kind: FailureKind,
    pub message: String,
}

impl StoreError {
    pub fn new(code: StoreErrorCode, cause: impl fmt::Display) -> Self {
        Self::with_kind(code, FailureKind::Backend, cause)
    }

    pub fn not_found(code: StoreErrorCode) -> Self {
        Self::with_kind(code, FailureKind::NotFound, "record not found")
    }

    pub fn conflict(code: StoreErrorCode, cause: impl fmt::Display) -> Self {
        Self::with_kind(code, FailureKind::Conflict, cause)
    }

    fn with_kind(code: StoreErrorCode, kind: FailureKind, cause: impl fmt::Display) -> Self {
        Self {
            code,
            kind,
            message: format!("Failed to {}: {cause}", code.operation()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operations backing the API.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fails with [`FailureKind::Conflict`] when the email is already registered.
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>>;

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Insert a draft with an empty body and outline unless given.
    async fn create_blog(&self, blog: NewBlog) -> StoreResult<Blog>;

    /// A blog with its owner and attached media.
    async fn get_blog(&self, id: Uuid) -> StoreResult<Option<BlogDetail>>;

    /// All blogs of a user, newest first.
    async fn list_user_blogs(&self, user_id: Uuid) -> StoreResult<Vec<BlogWithMedia>>;

    /// Apply `changes` and bump `updated_at`.
    async fn update_blog(&self, id: Uuid, changes: BlogChanges) -> StoreResult<Blog>;

    async fn delete_blog(&self, id: Uuid) -> StoreResult<()>;

    async fn create_media(&self, media: NewMedia) -> StoreResult<Media>;

    async fn get_media(&self, id: Uuid) -> StoreResult<Option<Media>>;

    /// All media of a user, newest first.
    async fn list_user_media(&self, user_id: Uuid) -> StoreResult<Vec<Media>>;

    async fn delete_media(&self, id: Uuid) -> StoreResult<()>;

    async fn track_usage(&self, event: NewUsageEvent) -> StoreResult<UsageEvent>;

    /// Event counts per action over the last `days` days.
    async fn usage_stats(&self, user_id: Uuid, days: u32) -> StoreResult<Vec<UsageCount>>;

    /// Never fails; an unreachable backend is reported as unhealthy.
    async fn health(&self) -> HealthReport;
}
