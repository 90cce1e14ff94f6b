use serde_json::json;

use crate::common::{MAX_UPLOAD_BYTES, StubImageHost, TestApp, routes};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake image";

#[tokio::test]
async fn upload_stores_hosted_asset_details() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ada@example.com", "securepass").await;
    let blog_id = app.create_blog(&token, "Illustrated post").await;

    let res = app
        .upload_with_token(
            "hero.png",
            PNG.to_vec(),
            &[
                ("type", "image"),
                ("blogId", &blog_id),
                ("description", "Hero shot"),
                ("tags", "hero, banner"),
            ],
            &token,
        )
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    let media = &res.body["data"];
    assert_eq!(media["type"], "image");
    assert_eq!(media["blogId"], blog_id);
    assert_eq!(media["filename"], "hero.png");
    assert_eq!(media["mimeType"], "image/png");
    assert_eq!(media["size"], PNG.len());
    assert_eq!(media["url"], "https://res.example.com/contentcraft/hero.png");
    assert_eq!(
        media["metadata"],
        json!({
            "publicId": "contentcraft/hero.png",
            "width": 1200,
            "height": 630,
            "format": "png",
            "thumbnailUrl": "https://res.example.com/w_800,h_400/contentcraft/hero.png",
            "description": "Hero shot",
            "tags": ["hero", "banner"],
        })
    );

    let blog = app.get_with_token(&routes::blog(&blog_id), &token).await;
    assert_eq!(blog.body["data"]["media"][0]["id"], media["id"]);
}

#[tokio::test]
async fn upload_requires_a_known_media_type() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ada@example.com", "securepass").await;

    let res = app
        .upload_with_token("hero.png", PNG.to_vec(), &[("type", "gif")], &token)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(res.body["errors"][0].as_str().unwrap().starts_with("type: "));
}

#[tokio::test]
async fn empty_file_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ada@example.com", "securepass").await;

    let res = app
        .upload_with_token("hero.png", Vec::new(), &[("type", "image")], &token)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["errors"], json!(["file: Required"]));
}

#[tokio::test]
async fn oversized_file_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ada@example.com", "securepass").await;

    let res = app
        .upload_with_token(
            "big.png",
            vec![0u8; MAX_UPLOAD_BYTES + 1],
            &[("type", "image")],
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(
        res.body["errors"],
        json!([format!("file: File must be at most {MAX_UPLOAD_BYTES} bytes")])
    );
}

#[tokio::test]
async fn upload_to_someone_elses_blog_is_not_found() {
    let app = TestApp::spawn().await;
    let ada = app.create_authenticated_user("ada@example.com", "securepass").await;
    let bob = app.create_authenticated_user("bob@example.com", "securepass").await;
    let blog_id = app.create_blog(&ada, "Private post").await;

    let res = app
        .upload_with_token(
            "hero.png",
            PNG.to_vec(),
            &[("type", "image"), ("blogId", &blog_id)],
            &bob,
        )
        .await;

    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn rejected_upload_is_a_bad_gateway() {
    let app = TestApp::spawn_with(StubImageHost {
        reject_uploads: true,
        ..Default::default()
    })
    .await;
    let token = app.create_authenticated_user("ada@example.com", "securepass").await;

    let res = app
        .upload_with_token("hero.png", PNG.to_vec(), &[("type", "image")], &token)
        .await;

    assert_eq!(res.status, 502);
    assert_eq!(res.body["code"], "UPLOAD_FAILED");
    assert_eq!(res.body["error"], "Invalid image file");

    let list = app.get_with_token(routes::MEDIA, &token).await;
    assert_eq!(list.body["data"], json!([]));
}

#[tokio::test]
async fn failed_record_write_destroys_the_hosted_copy() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ada@example.com", "securepass").await;
    app.store.set_offline(true);

    let res = app
        .upload_with_token("hero.png", PNG.to_vec(), &[("type", "image")], &token)
        .await;

    assert_eq!(res.status, 500);
    assert_eq!(res.body["code"], "MEDIA_CREATE_ERROR");
    assert_eq!(
        *app.images.destroyed.lock().unwrap(),
        vec!["contentcraft/hero.png".to_string()]
    );
}

#[tokio::test]
async fn delete_removes_record_and_hosted_asset() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ada@example.com", "securepass").await;

    let uploaded = app
        .upload_with_token("hero.png", PNG.to_vec(), &[("type", "image")], &token)
        .await;
    let id = uploaded.id();

    let list = app.get_with_token(routes::MEDIA, &token).await;
    assert_eq!(list.body["data"].as_array().unwrap().len(), 1);

    let res = app.delete_with_token(&routes::media_item(&id), &token).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(
        *app.images.destroyed.lock().unwrap(),
        vec!["contentcraft/hero.png".to_string()]
    );

    let list = app.get_with_token(routes::MEDIA, &token).await;
    assert_eq!(list.body["data"], json!([]));

    let again = app.delete_with_token(&routes::media_item(&id), &token).await;
    assert_eq!(again.status, 404);
}

#[tokio::test]
async fn deleting_a_blog_keeps_its_media_detached() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ada@example.com", "securepass").await;
    let blog_id = app.create_blog(&token, "Illustrated post").await;
    app.upload_with_token(
        "hero.png",
        PNG.to_vec(),
        &[("type", "image"), ("blogId", &blog_id)],
        &token,
    )
    .await;

    app.delete_with_token(&routes::blog(&blog_id), &token).await;

    let list = app.get_with_token(routes::MEDIA, &token).await;
    let items = list.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0]["blogId"].is_null());
}
