use serde_json::json;

use crate::common::{TestApp, routes};

fn sample_blog() -> serde_json::Value {
    json!({
        "title": "Diagnostics Post",
        "topic": "Checking the helpers end to end",
        "tone": "friendly",
        "style": "how-to",
        "length": "short",
    })
}

mod health {
    use super::*;

    #[tokio::test]
    async fn healthy_store_reports_counts() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ada@example.com", "securepass").await;
        app.create_blog(&token, "Counted post").await;

        let res = app.get_without_token(routes::HEALTH).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["success"], true);
        assert_eq!(res.body["data"]["status"], "healthy");
        assert_eq!(res.body["data"]["connection"], "connected");
        assert_eq!(
            res.body["data"]["stats"],
            json!({"users": 1, "blogs": 1, "media": 0})
        );
    }

    #[tokio::test]
    async fn unreachable_store_is_service_unavailable() {
        let app = TestApp::spawn().await;
        app.store.set_offline(true);

        let res = app.get_without_token(routes::HEALTH).await;

        assert_eq!(res.status, 503);
        assert_eq!(res.body["success"], false);
        assert_eq!(res.body["data"]["status"], "unhealthy");
        assert_eq!(res.body["data"]["connection"], "disconnected");
        assert!(res.body["data"]["error"].is_string());
    }
}

mod diagnostics {
    use super::*;

    #[tokio::test]
    async fn report_covers_store_helpers_and_validation() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::DIAGNOSTICS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Diagnostics completed successfully");
        let report = &res.body["data"];
        assert_eq!(report["database"]["status"], "healthy");
        assert_eq!(report["utilities"]["slugify"], "test-blog-post-title");
        assert_eq!(report["utilities"]["capitalizeWords"], "Hello World Test");
        assert_eq!(report["validation"]["success"], true);
        assert_eq!(report["validation"]["data"]["title"], "Test Blog Post");
    }

    #[tokio::test]
    async fn valid_blog_is_echoed_with_helpers() {
        let app = TestApp::spawn().await;

        let res = app.post_without_token(routes::DIAGNOSTICS, &sample_blog()).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Validation passed");
        assert_eq!(res.body["data"]["validation"]["style"], "how-to");
        assert_eq!(res.body["data"]["utilities"]["slugify"], "diagnostics-post");
        assert_eq!(
            res.body["data"]["utilities"]["capitalizeWords"],
            "Checking The Helpers End To End"
        );
    }

    #[tokio::test]
    async fn invalid_blog_lists_validation_errors() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::DIAGNOSTICS, &json!({"title": "Hi"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["success"], false);
        assert_eq!(res.body["message"], "Validation failed");
        let errors = res.body["validation"].as_array().unwrap();
        assert_eq!(errors[0], "title: Title must be at least 5 characters");
        assert_eq!(errors.len(), 5);
    }
}

mod validate {
    use super::*;

    #[tokio::test]
    async fn valid_payload_comes_back_with_defaults() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(&routes::validate("export-options"), &json!({"format": "html"}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(
            res.body,
            json!({
                "success": true,
                "data": {
                    "format": "html",
                    "includeMetadata": true,
                    "includeImages": true,
                    "customCSS": null,
                }
            })
        );
    }

    #[tokio::test]
    async fn invalid_payload_lists_every_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                &routes::validate("blog-search"),
                &json!({"query": "", "limit": 500}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["success"], false);
        assert_eq!(res.body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_schema_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(&routes::validate("nonsense"), &json!({}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert!(res.body["error"].as_str().unwrap().contains("blog-creation"));
    }
}

mod docs {
    use super::*;

    #[tokio::test]
    async fn openapi_document_lists_the_api() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token("/api-docs/openapi.json").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["info"]["title"], "ContentCraft API");
        let paths = res.body["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/v1/blogs/{id}/publish"));
        assert!(paths.contains_key("/api/v1/validate/{schema}"));
    }
}
