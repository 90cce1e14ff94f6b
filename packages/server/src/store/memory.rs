use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use common::BlogStatus;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    Blog, BlogChanges, BlogDetail, BlogWithMedia, ContentStore, HealthReport, Media, NewBlog,
    NewMedia, NewUsageEvent, NewUser, StoreError, StoreErrorCode, StoreResult, StoreStats,
    UsageCount, UsageEvent, User, UserCredentials,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, UserCredentials>,
    blogs: HashMap<Uuid, Blog>,
    media: HashMap<Uuid, Media>,
    usage: Vec<UsageEvent>,
}

/// Process-local [`ContentStore`] with the same semantics as [`super::SqlStore`].
///
/// Used by the test harness and for running the API without a database.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable backend: every operation fails and health
    /// reports disconnected.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self, code: StoreErrorCode) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::new(code, "connection refused"));
        }
        Ok(())
    }
}

impl Tables {
    fn media_of(&self, blog_id: Uuid) -> Vec<Media> {
        let mut media: Vec<Media> = self
            .media
            .values()
            .filter(|m| m.blog_id == Some(blog_id))
            .cloned()
            .collect();
        media.sort_by_key(|m| Reverse((m.created_at, m.id)));
        media
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let code = StoreErrorCode::UserCreate;
        self.check(code)?;
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|c| c.user.email == new.email) {
            return Err(StoreError::conflict(code, "email already registered"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: new.name,
            email: new.email,
            image: new.image,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(
            user.id,
            UserCredentials {
                user: user.clone(),
                password_hash: new.password_hash,
            },
        );
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>> {
        self.check(StoreErrorCode::UserGet)?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|c| c.user.email == email)
            .cloned())
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        self.check(StoreErrorCode::UserGet)?;
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).map(|c| c.user.clone()))
    }

    async fn create_blog(&self, new: NewBlog) -> StoreResult<Blog> {
        self.check(StoreErrorCode::BlogCreate)?;
        let now = Utc::now();
        let blog = Blog {
            id: Uuid::now_v7(),
            user_id: new.user_id,
            title: new.title,
            topic: new.topic,
            tone: new.tone,
            style: new.style,
            length: new.length,
            content: new.content.unwrap_or_default(),
            outline: new.outline.unwrap_or_default(),
            status: BlogStatus::Draft,
            tags: Vec::new(),
            featured: false,
            published_at: None,
            hero_image_url: None,
            hero_image_prompt: None,
            hero_image_caption: None,
            hero_image_alt: None,
            seo_score: None,
            meta_title: None,
            meta_description: None,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.blogs.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn get_blog(&self, id: Uuid) -> StoreResult<Option<BlogDetail>> {
        let code = StoreErrorCode::BlogGet;
        self.check(code)?;
        let tables = self.tables.read().await;
        let Some(blog) = tables.blogs.get(&id) else {
            return Ok(None);
        };
        let owner = tables
            .users
            .get(&blog.user_id)
            .ok_or_else(|| StoreError::new(code, "blog owner is missing"))?;

        Ok(Some(BlogDetail {
            blog: blog.clone(),
            user: owner.user.clone().into(),
            media: tables.media_of(id),
        }))
    }

    async fn list_user_blogs(&self, user_id: Uuid) -> StoreResult<Vec<BlogWithMedia>> {
        self.check(StoreErrorCode::BlogList)?;
        let tables = self.tables.read().await;
        let mut blogs: Vec<&Blog> = tables
            .blogs
            .values()
            .filter(|b| b.user_id == user_id)
            .collect();
        blogs.sort_by_key(|b| Reverse((b.created_at, b.id)));

        Ok(blogs
            .into_iter()
            .map(|b| BlogWithMedia {
                blog: b.clone(),
                media: tables.media_of(b.id),
            })
            .collect())
    }

    async fn update_blog(&self, id: Uuid, changes: BlogChanges) -> StoreResult<Blog> {
        let code = StoreErrorCode::BlogUpdate;
        self.check(code)?;
        let mut tables = self.tables.write().await;
        let blog = tables
            .blogs
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(code))?;

        if let Some(title) = changes.title {
            blog.title = title;
        }
        if let Some(topic) = changes.topic {
            blog.topic = topic;
        }
        if let Some(content) = changes.content {
            blog.content = content;
        }
        if let Some(outline) = changes.outline {
            blog.outline = outline;
        }
        if let Some(status) = changes.status {
            blog.status = status;
        }
        if let Some(tags) = changes.tags {
            blog.tags = tags;
        }
        if let Some(featured) = changes.featured {
            blog.featured = featured;
        }
        if changes.published_at.is_some() {
            blog.published_at = changes.published_at;
        }
        if changes.meta_title.is_some() {
            blog.meta_title = changes.meta_title;
        }
        if changes.meta_description.is_some() {
            blog.meta_description = changes.meta_description;
        }
        blog.updated_at = Utc::now();
        Ok(blog.clone())
    }

    async fn delete_blog(&self, id: Uuid) -> StoreResult<()> {
        let code = StoreErrorCode::BlogDelete;
        self.check(code)?;
        let mut tables = self.tables.write().await;
        tables
            .blogs
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(code))?;
        // Media outlives its blog.
        for media in tables.media.values_mut() {
            if media.blog_id == Some(id) {
                media.blog_id = None;
            }
        }
        Ok(())
    }

    async fn create_media(&self, new: NewMedia) -> StoreResult<Media> {
        self.check(StoreErrorCode::MediaCreate)?;
        let media = Media {
            id: Uuid::now_v7(),
            user_id: new.user_id,
            blog_id: new.blog_id,
            kind: new.kind,
            url: new.url,
            filename: new.filename,
            size: new.size,
            mime_type: new.mime_type,
            metadata: Value::Object(new.metadata),
            created_at: Utc::now(),
        };
        self.tables.write().await.media.insert(media.id, media.clone());
        Ok(media)
    }

    async fn get_media(&self, id: Uuid) -> StoreResult<Option<Media>> {
        self.check(StoreErrorCode::MediaGet)?;
        Ok(self.tables.read().await.media.get(&id).cloned())
    }

    async fn list_user_media(&self, user_id: Uuid) -> StoreResult<Vec<Media>> {
        self.check(StoreErrorCode::MediaList)?;
        let tables = self.tables.read().await;
        let mut media: Vec<Media> = tables
            .media
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        media.sort_by_key(|m| Reverse((m.created_at, m.id)));
        Ok(media)
    }

    async fn delete_media(&self, id: Uuid) -> StoreResult<()> {
        let code = StoreErrorCode::MediaDelete;
        self.check(code)?;
        self.tables
            .write()
            .await
            .media
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(code))
    }

    async fn track_usage(&self, event: NewUsageEvent) -> StoreResult<UsageEvent> {
        self.check(StoreErrorCode::UsageTrack)?;
        let event = UsageEvent {
            id: Uuid::now_v7(),
            user_id: event.user_id,
            action: event.action,
            details: Value::Object(event.details.unwrap_or_default()),
            timestamp: event.timestamp,
        };
        self.tables.write().await.usage.push(event.clone());
        Ok(event)
    }

    async fn usage_stats(&self, user_id: Uuid, days: u32) -> StoreResult<Vec<UsageCount>> {
        self.check(StoreErrorCode::UsageStats)?;
        let since = Utc::now() - Duration::days(i64::from(days));
        let tables = self.tables.read().await;

        let mut counts: HashMap<&str, i64> = HashMap::new();
        for event in tables
            .usage
            .iter()
            .filter(|e| e.user_id == user_id && e.timestamp >= since)
        {
            *counts.entry(event.action.as_str()).or_default() += 1;
        }

        let mut stats: Vec<UsageCount> = counts
            .into_iter()
            .map(|(action, count)| UsageCount {
                action: action.to_string(),
                count,
            })
            .collect();
        stats.sort_by(|a, b| a.action.cmp(&b.action));
        Ok(stats)
    }

    async fn health(&self) -> HealthReport {
        if self.offline.load(Ordering::SeqCst) {
            return HealthReport::unhealthy("connection refused");
        }
        let tables = self.tables.read().await;
        HealthReport::healthy(StoreStats {
            users: tables.users.len() as u64,
            blogs: tables.blogs.len() as u64,
            media: tables.media.len() as u64,
        })
    }
}
