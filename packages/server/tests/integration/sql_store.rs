use ::common::{BlogLength, BlogStatus, BlogStyle, BlogTone, MediaKind, Outline};
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use contentcraft_server::store::{
    BlogChanges, ContentStore, FailureKind, NewBlog, NewMedia, NewUsageEvent, NewUser,
    StoreErrorCode, UsageCount,
};

use crate::common::postgres::fresh_store;

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Ada".into(),
        email: email.into(),
        image: None,
        password_hash: "$argon2id$placeholder".into(),
    }
}

fn new_blog(user_id: Uuid, title: &str) -> NewBlog {
    NewBlog {
        user_id,
        title: title.into(),
        topic: "Adopting Rust in a small team".into(),
        tone: BlogTone::Professional,
        style: BlogStyle::Informative,
        length: BlogLength::Medium,
        content: None,
        outline: Some(Outline::from(vec!["Intro".to_string()])),
    }
}

fn usage(user_id: Uuid, action: &str, days_ago: i64) -> NewUsageEvent {
    NewUsageEvent {
        user_id,
        action: action.into(),
        details: None,
        timestamp: Utc::now() - Duration::days(days_ago),
    }
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let store = fresh_store().await;
    store.create_user(new_user("ada@example.com")).await.unwrap();

    let err = store
        .create_user(new_user("ada@example.com"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Conflict);
    assert_eq!(err.code, StoreErrorCode::UserCreate);
}

#[tokio::test]
async fn update_changes_only_given_columns() {
    let store = fresh_store().await;
    let owner = store.create_user(new_user("ada@example.com")).await.unwrap();
    let blog = store.create_blog(new_blog(owner.id, "Draft")).await.unwrap();

    let updated = store
        .update_blog(
            blog.id,
            BlogChanges {
                status: Some(BlogStatus::Published),
                tags: Some(vec!["rust".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Draft");
    assert_eq!(updated.outline, Outline::from(vec!["Intro".to_string()]));
    assert_eq!(updated.status, BlogStatus::Published);
    assert_eq!(updated.tags, vec!["rust".to_string()]);
    assert!(updated.updated_at >= blog.updated_at);

    let err = store
        .update_blog(Uuid::now_v7(), BlogChanges::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::NotFound);
}

#[tokio::test]
async fn deleting_a_blog_detaches_its_media() {
    let store = fresh_store().await;
    let owner = store.create_user(new_user("ada@example.com")).await.unwrap();
    let blog = store.create_blog(new_blog(owner.id, "With hero")).await.unwrap();
    let media = store
        .create_media(NewMedia {
            user_id: owner.id,
            blog_id: Some(blog.id),
            kind: MediaKind::Image,
            url: "https://res.example.com/contentcraft/hero".into(),
            filename: "hero.png".into(),
            size: 2048,
            mime_type: "image/png".into(),
            metadata: json!({"publicId": "contentcraft/hero"})
                .as_object()
                .cloned()
                .unwrap(),
        })
        .await
        .unwrap();

    let detail = store.get_blog(blog.id).await.unwrap().unwrap();
    assert_eq!(detail.media.len(), 1);

    store.delete_blog(blog.id).await.unwrap();

    let kept = store.get_media(media.id).await.unwrap().unwrap();
    assert_eq!(kept.blog_id, None);
    assert_eq!(kept.metadata, json!({"publicId": "contentcraft/hero"}));
}

#[tokio::test]
async fn usage_stats_counts_recent_events_per_action() {
    let store = fresh_store().await;
    let owner = store.create_user(new_user("ada@example.com")).await.unwrap();
    let other = store.create_user(new_user("bob@example.com")).await.unwrap();

    for event in [
        usage(owner.id, "generate", 1),
        usage(owner.id, "export", 2),
        usage(owner.id, "generate", 3),
        usage(owner.id, "export", 45),
        usage(other.id, "export", 1),
    ] {
        store.track_usage(event).await.unwrap();
    }

    let stats = store.usage_stats(owner.id, 30).await.unwrap();
    assert_eq!(
        stats,
        vec![
            UsageCount {
                action: "export".into(),
                count: 1
            },
            UsageCount {
                action: "generate".into(),
                count: 2
            },
        ]
    );
}

#[tokio::test]
async fn health_counts_rows() {
    let store = fresh_store().await;
    let owner = store.create_user(new_user("ada@example.com")).await.unwrap();
    store.create_blog(new_blog(owner.id, "One")).await.unwrap();

    let report = store.health().await;
    assert!(report.is_healthy());
    let stats = report.stats.unwrap();
    assert_eq!((stats.users, stats.blogs, stats.media), (1, 1, 0));
}
