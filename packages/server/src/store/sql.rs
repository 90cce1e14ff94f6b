use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use common::{BlogStatus, Outline};
use sea_orm::prelude::Expr;
use sea_orm::*;
use serde_json::Value;
use uuid::Uuid;

use super::{
    Blog, BlogChanges, BlogDetail, BlogWithMedia, ContentStore, HealthReport, Media, NewBlog,
    NewMedia, NewUsageEvent, NewUser, StoreError, StoreErrorCode, StoreResult, StoreStats,
    UsageCount, UsageEvent, User, UserCredentials,
};
use crate::entity::{blog, media, usage_event, user};

/// [`ContentStore`] backed by a relational database through SeaORM.
#[derive(Clone)]
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn media_for_blogs(
        &self,
        blog_ids: Vec<Uuid>,
        code: StoreErrorCode,
    ) -> StoreResult<HashMap<Uuid, Vec<Media>>> {
        if blog_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = media::Entity::find()
            .filter(media::Column::BlogId.is_in(blog_ids))
            .order_by_desc(media::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::new(code, e))?;

        let mut grouped: HashMap<Uuid, Vec<Media>> = HashMap::new();
        for row in rows {
            if let Some(blog_id) = row.blog_id {
                grouped.entry(blog_id).or_default().push(row.into());
            }
        }
        Ok(grouped)
    }

    async fn counts(&self) -> Result<StoreStats, DbErr> {
        Ok(StoreStats {
            users: user::Entity::find().count(&self.db).await?,
            blogs: blog::Entity::find().count(&self.db).await?,
            media: media::Entity::find().count(&self.db).await?,
        })
    }
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            image: m.image,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<blog::Model> for Blog {
    fn from(m: blog::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            topic: m.topic,
            tone: m.tone,
            style: m.style,
            length: m.length,
            content: m.content,
            outline: Outline::from_stored(&m.outline),
            status: m.status,
            tags: string_list(&m.tags),
            featured: m.featured,
            published_at: m.published_at,
            hero_image_url: m.hero_image_url,
            hero_image_prompt: m.hero_image_prompt,
            hero_image_caption: m.hero_image_caption,
            hero_image_alt: m.hero_image_alt,
            seo_score: m.seo_score,
            meta_title: m.meta_title,
            meta_description: m.meta_description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<media::Model> for Media {
    fn from(m: media::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            blog_id: m.blog_id,
            kind: m.kind,
            url: m.url,
            filename: m.filename,
            size: m.size,
            mime_type: m.mime_type,
            metadata: m.metadata,
            created_at: m.created_at,
        }
    }
}

impl From<usage_event::Model> for UsageEvent {
    fn from(m: usage_event::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            action: m.action,
            details: m.details,
            timestamp: m.timestamp,
        }
    }
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl ContentStore for SqlStore {
    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(new.name),
            email: Set(new.email),
            image: Set(new.image),
            password: Set(new.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let code = StoreErrorCode::UserCreate;
        let created = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                StoreError::conflict(code, "email already registered")
            }
            _ => StoreError::new(code, e),
        })?;
        Ok(created.into())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| StoreError::new(StoreErrorCode::UserGet, e))?;

        Ok(found.map(|m| UserCredentials {
            password_hash: m.password.clone(),
            user: m.into(),
        }))
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let found = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::new(StoreErrorCode::UserGet, e))?;
        Ok(found.map(Into::into))
    }

    async fn create_blog(&self, new: NewBlog) -> StoreResult<Blog> {
        let now = Utc::now();
        let model = blog::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(new.user_id),
            title: Set(new.title),
            topic: Set(new.topic),
            tone: Set(new.tone),
            style: Set(new.style),
            length: Set(new.length),
            content: Set(new.content.unwrap_or_default()),
            outline: Set(new.outline.unwrap_or_default().to_stored()),
            status: Set(BlogStatus::Draft),
            tags: Set(Value::Array(Vec::new())),
            featured: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| StoreError::new(StoreErrorCode::BlogCreate, e))?;
        Ok(created.into())
    }

    async fn get_blog(&self, id: Uuid) -> StoreResult<Option<BlogDetail>> {
        let code = StoreErrorCode::BlogGet;
        let Some((found, owner)) = blog::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::new(code, e))?
        else {
            return Ok(None);
        };

        let owner = owner.ok_or_else(|| StoreError::new(code, "blog owner is missing"))?;
        let mut media = self.media_for_blogs(vec![found.id], code).await?;

        Ok(Some(BlogDetail {
            media: media.remove(&found.id).unwrap_or_default(),
            user: User::from(owner).into(),
            blog: found.into(),
        }))
    }

    async fn list_user_blogs(&self, user_id: Uuid) -> StoreResult<Vec<BlogWithMedia>> {
        let code = StoreErrorCode::BlogList;
        let blogs = blog::Entity::find()
            .filter(blog::Column::UserId.eq(user_id))
            .order_by_desc(blog::Column::CreatedAt)
            .order_by_desc(blog::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::new(code, e))?;

        let mut media = self
            .media_for_blogs(blogs.iter().map(|b| b.id).collect(), code)
            .await?;

        Ok(blogs
            .into_iter()
            .map(|b| BlogWithMedia {
                media: media.remove(&b.id).unwrap_or_default(),
                blog: b.into(),
            })
            .collect())
    }

    async fn update_blog(&self, id: Uuid, changes: BlogChanges) -> StoreResult<Blog> {
        let code = StoreErrorCode::BlogUpdate;
        let mut model = blog::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(title) = changes.title {
            model.title = Set(title);
        }
        if let Some(topic) = changes.topic {
            model.topic = Set(topic);
        }
        if let Some(content) = changes.content {
            model.content = Set(content);
        }
        if let Some(outline) = changes.outline {
            model.outline = Set(outline.to_stored());
        }
        if let Some(status) = changes.status {
            model.status = Set(status);
        }
        if let Some(tags) = changes.tags {
            model.tags = Set(Value::from(tags));
        }
        if let Some(featured) = changes.featured {
            model.featured = Set(featured);
        }
        if let Some(published_at) = changes.published_at {
            model.published_at = Set(Some(published_at));
        }
        if let Some(meta_title) = changes.meta_title {
            model.meta_title = Set(Some(meta_title));
        }
        if let Some(meta_description) = changes.meta_description {
            model.meta_description = Set(Some(meta_description));
        }
        model.updated_at = Set(Utc::now());

        // Only the set columns are written; a missing row comes back as
        // `RecordNotUpdated` from the RETURNING clause.
        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => StoreError::not_found(code),
            e => StoreError::new(code, e),
        })?;
        Ok(updated.into())
    }

    async fn delete_blog(&self, id: Uuid) -> StoreResult<()> {
        let code = StoreErrorCode::BlogDelete;
        let res = blog::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::new(code, e))?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found(code));
        }
        Ok(())
    }

    async fn create_media(&self, new: NewMedia) -> StoreResult<Media> {
        let model = media::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(new.user_id),
            blog_id: Set(new.blog_id),
            kind: Set(new.kind),
            url: Set(new.url),
            filename: Set(new.filename),
            size: Set(new.size),
            mime_type: Set(new.mime_type),
            metadata: Set(Value::Object(new.metadata)),
            created_at: Set(Utc::now()),
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| StoreError::new(StoreErrorCode::MediaCreate, e))?;
        Ok(created.into())
    }

    async fn get_media(&self, id: Uuid) -> StoreResult<Option<Media>> {
        let found = media::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::new(StoreErrorCode::MediaGet, e))?;
        Ok(found.map(Into::into))
    }

    async fn list_user_media(&self, user_id: Uuid) -> StoreResult<Vec<Media>> {
        let rows = media::Entity::find()
            .filter(media::Column::UserId.eq(user_id))
            .order_by_desc(media::Column::CreatedAt)
            .order_by_desc(media::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::new(StoreErrorCode::MediaList, e))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_media(&self, id: Uuid) -> StoreResult<()> {
        let code = StoreErrorCode::MediaDelete;
        let res = media::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::new(code, e))?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found(code));
        }
        Ok(())
    }

    async fn track_usage(&self, event: NewUsageEvent) -> StoreResult<UsageEvent> {
        let model = usage_event::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(event.user_id),
            action: Set(event.action),
            details: Set(Value::Object(event.details.unwrap_or_default())),
            timestamp: Set(event.timestamp),
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| StoreError::new(StoreErrorCode::UsageTrack, e))?;
        Ok(created.into())
    }

    async fn usage_stats(&self, user_id: Uuid, days: u32) -> StoreResult<Vec<UsageCount>> {
        let since = Utc::now() - Duration::days(i64::from(days));

        usage_event::Entity::find()
            .select_only()
            .column(usage_event::Column::Action)
            .column_as(Expr::cust("COUNT(*)"), "count")
            .filter(usage_event::Column::UserId.eq(user_id))
            .filter(usage_event::Column::Timestamp.gte(since))
            .group_by(usage_event::Column::Action)
            .order_by_asc(usage_event::Column::Action)
            .into_model::<UsageCount>()
            .all(&self.db)
            .await
            .map_err(|e| StoreError::new(StoreErrorCode::UsageStats, e))
    }

    async fn health(&self) -> HealthReport {
        let backend = self.db.get_database_backend();
        if let Err(e) = self
            .db
            .execute_raw(Statement::from_string(backend, "SELECT 1"))
            .await
        {
            tracing::error!(error = %e, "Database health check failed");
            return HealthReport::unhealthy(e.to_string());
        }

        match self.counts().await {
            Ok(stats) => HealthReport::healthy(stats),
            Err(e) => {
                tracing::error!(error = %e, "Database health check failed");
                HealthReport::unhealthy(e.to_string())
            }
        }
    }
}
