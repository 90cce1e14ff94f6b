use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn tracked_events_are_counted_per_action() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ada@example.com", "securepass").await;

    for action in ["generate", "generate", "publish"] {
        let res = app
            .post_with_token(
                routes::USAGE,
                &json!({"action": action, "details": {"model": "gpt"}}),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    let res = app.get_with_token(routes::USAGE_STATS, &token).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["data"]["days"], 30);
    assert_eq!(res.body["data"]["total"], 3);
    assert_eq!(
        res.body["data"]["actions"],
        json!([
            {"action": "generate", "count": 2},
            {"action": "publish", "count": 1},
        ])
    );
}

#[tokio::test]
async fn events_older_than_the_window_are_ignored() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ada@example.com", "securepass").await;

    app.post_with_token(
        routes::USAGE,
        &json!({"action": "generate", "timestamp": "2020-01-01T00:00:00Z"}),
        &token,
    )
    .await;

    let res = app
        .get_with_token(&format!("{}?days=7", routes::USAGE_STATS), &token)
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["data"]["days"], 7);
    assert_eq!(res.body["data"]["total"], 0);
    assert_eq!(res.body["data"]["actions"], json!([]));
}

#[tokio::test]
async fn days_out_of_range_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ada@example.com", "securepass").await;

    let res = app
        .get_with_token(&format!("{}?days=0", routes::USAGE_STATS), &token)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn action_is_required() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ada@example.com", "securepass").await;

    let res = app
        .post_with_token(routes::USAGE, &json!({"details": {}}), &token)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["errors"], json!(["action: Required"]));
}

#[tokio::test]
async fn tracking_requires_a_session() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(routes::USAGE, &json!({"action": "generate"}))
        .await;

    assert_eq!(res.status, 401);
}
