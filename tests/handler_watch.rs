mod common;

use axum_test::TestServer;
use common::{InMemoryPosts, post, redirect};
use std::sync::Arc;
use vidlink::domain::entities::{
    ButtonKind, CounterConfig, FloatingButton, GlobalSettings, RedirectBehavior, ScriptConfig,
    ScriptPosition,
};
use vidlink::player::DeviceClass;

fn settings() -> GlobalSettings {
    GlobalSettings {
        floating_buttons: vec![
            FloatingButton {
                id: "share-1".to_string(),
                kind: ButtonKind::Share,
                url: String::new(),
                enabled: true,
            },
            FloatingButton {
                id: "tg".to_string(),
                kind: ButtonKind::Telegram,
                url: "https://t.me/channel".to_string(),
                enabled: true,
            },
        ],
        redirect: redirect(RedirectBehavior::Behind, 3600),
        counter: CounterConfig {
            enabled: true,
            counter_key: "k9".to_string(),
        },
        scripts: vec![ScriptConfig {
            id: "s1".to_string(),
            name: "analytics".to_string(),
            content: "window.analyticsLoaded = true;".to_string(),
            position: ScriptPosition::Head,
            enabled: true,
        }],
    }
}

fn server() -> TestServer {
    let (state, _clock) = common::create_test_state(
        Arc::new(InMemoryPosts::new(vec![post(1, "Funny <cats>"), post(2, "Two")])),
        settings(),
        DeviceClass::Desktop,
    );
    TestServer::new(common::app(state)).unwrap()
}

#[tokio::test]
async fn test_watch_page_renders() {
    let server = server();

    let response = server.get("/?p=1").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("aria-label=\"Reproducir video\""));
    assert!(!html.contains("Funny <cats>"));
    assert!(html.contains("<script id=\"custom-script-s1\">window.analyticsLoaded = true;</script>"));
    assert!(html.contains("//whos.amung.us/pingjs/?k=k9;"));
    assert!(html.contains("\"preopenTab\":true"));
    assert!(html.contains("\"postId\":1"));

    let telegram = html.find("id=\"btn-tg\"").unwrap();
    let share = html.find("id=\"btn-share-1\"").unwrap();
    assert!(telegram < share);
}

#[tokio::test]
async fn test_watch_page_under_path() {
    let server = server();

    let response = server.get("/p/1").await;

    response.assert_status_ok();
    assert!(response.text().contains("\"postId\":1"));
}

#[tokio::test]
async fn test_watch_page_without_id() {
    let server = server();

    let response = server.get("/").await;

    response.assert_status_not_found();
    assert!(response.text().contains("Pagina no encontrada"));

    let response = server.get("/?p=abc").await;
    response.assert_status_not_found();
    assert!(response.text().contains("Pagina no encontrada"));
}

#[tokio::test]
async fn test_watch_page_unknown_post() {
    let server = server();

    let response = server.get("/?p=42").await;

    response.assert_status_not_found();
    assert!(response.text().contains("Contenido no disponible"));
}
