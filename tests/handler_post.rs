mod common;

use axum_test::TestServer;
use common::{InMemoryPosts, post, redirect};
use std::sync::Arc;
use vidlink::domain::entities::{GlobalSettings, Post, RedirectBehavior};
use vidlink::player::DeviceClass;

fn server(posts: Vec<Post>, settings: GlobalSettings) -> TestServer {
    let (state, _clock) = common::create_test_state(
        Arc::new(InMemoryPosts::new(posts)),
        settings,
        DeviceClass::Desktop,
    );
    TestServer::new(common::app(state)).unwrap()
}

#[tokio::test]
async fn test_public_post_returns_bundle() {
    let settings = GlobalSettings {
        redirect: redirect(RedirectBehavior::Front, 600),
        ..GlobalSettings::default()
    };
    let server = server(vec![post(1, "Clip"), post(2, "Other")], settings);

    let response = server.get("/api/public/post?id=1").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["post"]["id"], 1);
    assert_eq!(json["post"]["title"], "Clip");
    assert_eq!(json["post"]["isHLS"], false);
    assert_eq!(json["settings"]["redirect"]["behavior"], "front");
    assert_eq!(json["settings"]["redirect"]["cookieDuration"], 600);
    assert_eq!(json["otherPosts"], serde_json::json!([2]));
}

#[tokio::test]
async fn test_public_post_missing_id() {
    let server = server(vec![post(1, "Clip")], GlobalSettings::default());

    let response = server.get("/api/public/post").await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Post id is required");
}

#[tokio::test]
async fn test_public_post_malformed_id() {
    let server = server(vec![post(1, "Clip")], GlobalSettings::default());

    let response = server.get("/api/public/post?id=abc").await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Invalid post id");
}

#[tokio::test]
async fn test_public_post_unknown() {
    let server = server(vec![post(1, "Clip")], GlobalSettings::default());

    let response = server.get("/api/public/post?id=404").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_owner_without_settings_gets_defaults() {
    let now = common::start();
    let orphan = Post::new(
        7,
        "someone-else".to_string(),
        "Clip".to_string(),
        "https://cdn.example/7.mp4".to_string(),
        String::new(),
        false,
        now,
        now,
    );
    let settings = GlobalSettings {
        redirect: redirect(RedirectBehavior::Behind, 600),
        ..GlobalSettings::default()
    };
    let server = server(vec![orphan], settings);

    let response = server.get("/api/public/post?id=7").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["settings"]["redirect"]["enabled"], false);
    assert_eq!(json["settings"]["redirect"]["behavior"], "none");
    assert_eq!(json["settings"]["floatingButtons"], serde_json::json!([]));
    assert_eq!(json["otherPosts"], serde_json::json!([]));
}
