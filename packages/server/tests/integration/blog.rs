use serde_json::json;

use crate::common::{TestApp, routes};

fn new_blog(title: &str, tone: &str) -> serde_json::Value {
    json!({
        "title": title,
        "topic": "A topic long enough to pass validation",
        "tone": tone,
        "style": "informative",
        "length": "medium",
    })
}

mod crud {
    use super::*;

    #[tokio::test]
    async fn created_blog_starts_as_an_empty_draft() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;

        let res = app
            .post_with_token(routes::BLOGS, &new_blog("My First Post", "casual"), &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let blog = &res.body["data"];
        assert_eq!(blog["title"], "My First Post");
        assert_eq!(blog["tone"], "casual");
        assert_eq!(blog["status"], "draft");
        assert_eq!(blog["content"], "");
        assert_eq!(blog["outline"], json!([]));
        assert_eq!(blog["featured"], false);
    }

    #[tokio::test]
    async fn invalid_enum_value_lists_the_options() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;

        let res = app
            .post_with_token(routes::BLOGS, &new_blog("My First Post", "grumpy"), &token)
            .await;

        assert_eq!(res.status, 400);
        let errors = res.body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        let message = errors[0].as_str().unwrap();
        assert!(message.starts_with("tone: Invalid enum value."), "{message}");
        assert!(message.contains("'professional'"));
    }

    #[tokio::test]
    async fn list_returns_only_own_blogs_newest_first() {
        let app = TestApp::spawn().await;
        let ada = app.create_authenticated_user("ada@example.com", "securepass").await;
        let bob = app.create_authenticated_user("bob@example.com", "securepass").await;

        app.create_blog(&ada, "Older post").await;
        app.create_blog(&ada, "Newer post").await;
        app.create_blog(&bob, "Not yours").await;

        let res = app.get_with_token(routes::BLOGS, &ada).await;

        assert_eq!(res.status, 200);
        let titles: Vec<_> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["Newer post", "Older post"]);
        assert_eq!(res.body["data"][0]["media"], json!([]));
    }

    #[tokio::test]
    async fn get_includes_owner_and_media() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;
        let id = app.create_blog(&token, "Detailed post").await;

        let res = app.get_with_token(&routes::blog(&id), &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["id"], id);
        assert_eq!(res.body["data"]["user"]["email"], "ada@example.com");
        assert_eq!(res.body["data"]["media"], json!([]));
    }

    #[tokio::test]
    async fn other_users_blog_is_not_found() {
        let app = TestApp::spawn().await;
        let ada = app.create_authenticated_user("ada@example.com", "securepass").await;
        let bob = app.create_authenticated_user("bob@example.com", "securepass").await;
        let id = app.create_blog(&ada, "Private post").await;

        let res = app.get_with_token(&routes::blog(&id), &bob).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");

        let res = app.delete_with_token(&routes::blog(&id), &bob).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn update_changes_only_given_fields_and_sanitizes_content() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;
        let id = app.create_blog(&token, "Draft title").await;

        let res = app
            .patch_with_token(
                &routes::blog(&id),
                &json!({
                    "content": "<p onclick=\"x()\">Hello</p><script>alert(1)</script>",
                    "outline": "[\"Intro\",\"Body\"]",
                    "status": "archived",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let blog = &res.body["data"];
        assert_eq!(blog["title"], "Draft title");
        assert_eq!(blog["status"], "archived");
        assert_eq!(blog["outline"], json!(["Intro", "Body"]));
        let content = blog["content"].as_str().unwrap();
        assert!(!content.contains("<script>"));
        assert!(!content.contains("onclick"));
        assert!(content.contains("Hello"));
    }

    #[tokio::test]
    async fn delete_removes_the_blog() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;
        let id = app.create_blog(&token, "Short lived").await;

        let res = app.delete_with_token(&routes::blog(&id), &token).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"], id);

        let res = app.get_with_token(&routes::blog(&id), &token).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn store_outage_surfaces_the_operation_code() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;
        app.store.set_offline(true);

        let res = app.get_with_token(routes::BLOGS, &token).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "BLOG_LIST_ERROR");
        assert_eq!(res.body["success"], false);
    }
}

mod publishing {
    use super::*;

    #[tokio::test]
    async fn publish_stamps_date_and_seo_fields() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;
        let id = app.create_blog(&token, "Ready to ship").await;

        let res = app
            .post_with_token(
                &routes::blog_publish(&id),
                &json!({
                    "seoTitle": "Ready to ship",
                    "tags": ["launch"],
                    "publishDate": "2024-03-05T12:00:00Z",
                    "featured": true,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let blog = &res.body["data"];
        assert_eq!(blog["status"], "published");
        assert_eq!(blog["featured"], true);
        assert_eq!(blog["tags"], json!(["launch"]));
        assert_eq!(blog["metaTitle"], "Ready to ship");
        assert!(blog["publishedAt"].as_str().unwrap().starts_with("2024-03-05T12:00:00"));
    }

    #[tokio::test]
    async fn seo_title_longer_than_sixty_characters_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;
        let id = app.create_blog(&token, "Ready to ship").await;

        let res = app
            .post_with_token(
                &routes::blog_publish(&id),
                &json!({"seoTitle": "x".repeat(61)}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.body["errors"],
            json!(["seoTitle: SEO title must be less than 60 characters"])
        );
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn search_matches_filters_and_paginates() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;
        for title in ["Rust basics", "Rust ownership", "Rust async", "Gardening tips"] {
            app.create_blog(&token, title).await;
        }

        let res = app
            .post_with_token(
                routes::BLOG_SEARCH,
                &json!({
                    "query": "rust",
                    "filters": {"status": "draft"},
                    "sortBy": "title",
                    "sortOrder": "asc",
                    "page": 1,
                    "limit": 2,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let titles: Vec<_> = res.body["data"]["blogs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["Rust async", "Rust basics"]);
        assert_eq!(
            res.body["data"]["pagination"],
            json!({"page": 1, "perPage": 2, "total": 3, "totalPages": 2})
        );
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;

        let res = app
            .post_with_token(routes::BLOG_SEARCH, &json!({"query": ""}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["errors"], json!(["query: Search query is required"]));
    }

    #[tokio::test]
    async fn page_far_past_the_end_is_empty() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;
        app.create_blog(&token, "Rust basics").await;

        let res = app
            .post_with_token(
                routes::BLOG_SEARCH,
                &json!({"query": "rust", "page": i64::MAX}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["blogs"], json!([]));
        assert_eq!(res.body["data"]["pagination"]["total"], 1);
    }
}

mod export {
    use super::*;

    #[tokio::test]
    async fn markdown_export_renders_and_is_tracked() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;
        let id = app.create_blog(&token, "Export me now").await;
        app.patch_with_token(
            &routes::blog(&id),
            &json!({"content": "Body text."}),
            &token,
        )
        .await;

        let res = app
            .post_with_token(
                &routes::blog_export(&id),
                &json!({"format": "markdown", "includeMetadata": false}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["filename"], "export-me-now.md");
        assert_eq!(res.body["data"]["content"], "# Export me now\n\nBody text.\n");

        let stats = app.get_with_token(routes::USAGE_STATS, &token).await;
        assert_eq!(stats.body["data"]["actions"], json!([{"action": "export", "count": 1}]));
    }

    #[tokio::test]
    async fn pdf_export_is_not_supported() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;
        let id = app.create_blog(&token, "Export me now").await;

        let res = app
            .post_with_token(&routes::blog_export(&id), &json!({"format": "pdf"}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "Export format 'pdf' is not supported");
    }
}
