use chrono::{DateTime, Utc};
use common::{BlogLength, BlogStatus, BlogStyle, BlogTone, MediaKind, Outline};
use sea_orm::FromQueryResult;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Public profile of an account.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner fields embedded in a blog detail.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

impl From<User> for UserSummary {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            image: u.image,
        }
    }
}

/// A user together with the stored password hash, for login.
#[derive(Clone, Debug)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub password_hash: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub topic: String,
    pub tone: BlogTone,
    pub style: BlogStyle,
    pub length: BlogLength,
    pub content: String,
    pub outline: Outline,
    pub status: BlogStatus,
    pub tags: Vec<String>,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub hero_image_url: Option<String>,
    pub hero_image_prompt: Option<String>,
    pub hero_image_caption: Option<String>,
    pub hero_image_alt: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub seo_score: Option<Value>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a blog. New blogs always start as drafts.
#[derive(Clone, Debug)]
pub struct NewBlog {
    pub user_id: Uuid,
    pub title: String,
    pub topic: String,
    pub tone: BlogTone,
    pub style: BlogStyle,
    pub length: BlogLength,
    /// Defaults to an empty body.
    pub content: Option<String>,
    /// Defaults to an empty outline.
    pub outline: Option<Outline>,
}

/// Partial update of a blog; `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub topic: Option<String>,
    pub content: Option<String>,
    pub outline: Option<Outline>,
    pub status: Option<BlogStatus>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct BlogWithMedia {
    #[serde(flatten)]
    pub blog: Blog,
    pub media: Vec<Media>,
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct BlogDetail {
    #[serde(flatten)]
    pub blog: Blog,
    pub user: UserSummary,
    pub media: Vec<Media>,
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: Uuid,
    pub user_id: Uuid,
    pub blog_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    pub filename: String,
    pub size: i64,
    pub mime_type: String,
    #[schema(value_type = Object)]
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl Media {
    /// Identifier of the asset on the image host, when one was recorded.
    pub fn public_id(&self) -> Option<&str> {
        self.metadata.get("publicId").and_then(Value::as_str)
    }
}

#[derive(Clone, Debug)]
pub struct NewMedia {
    pub user_id: Uuid,
    pub blog_id: Option<Uuid>,
    pub kind: MediaKind,
    pub url: String,
    pub filename: String,
    pub size: i64,
    pub mime_type: String,
    pub metadata: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    #[schema(value_type = Object)]
    pub details: Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewUsageEvent {
    pub user_id: Uuid,
    pub action: String,
    pub details: Option<Map<String, Value>>,
    pub timestamp: DateTime<Utc>,
}

/// Number of events recorded for one action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct UsageCount {
    pub action: String,
    pub count: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct StoreStats {
    pub users: u64,
    pub blogs: u64,
    pub media: u64,
}

/// Liveness report of the backing store.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub connection: ConnectionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StoreStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    pub fn healthy(stats: StoreStats) -> Self {
        Self {
            status: HealthStatus::Healthy,
            connection: ConnectionState::Connected,
            stats: Some(stats),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            connection: ConnectionState::Disconnected,
            stats: None,
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
