//! Repository tests against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL` set: `cargo test -- --ignored`.

use sqlx::PgPool;
use std::sync::Arc;
use vidlink::domain::entities::RedirectBehavior;
use vidlink::domain::repositories::{PostRepository, SettingsRepository};
use vidlink::infrastructure::persistence::{PgPostRepository, PgSettingsRepository};

async fn insert_post(pool: &PgPool, user_id: &str, title: &str, age_minutes: i32) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO posts (user_id, title, video_url, is_hls, created_at)
        VALUES ($1, $2, 'https://cdn.example/v.m3u8', TRUE, NOW() - make_interval(mins => $3))
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(title)
    .bind(age_minutes)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_id(pool: PgPool) {
    let id = insert_post(&pool, "u1", "Clip", 0).await;
    let repo = PgPostRepository::new(Arc::new(pool));

    let post = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(post.title, "Clip");
    assert_eq!(post.owner_id, "u1");
    assert!(post.is_hls);
    assert_eq!(post.thumbnail_url, "");

    assert!(repo.find_by_id(id + 1000).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_siblings_newest_first(pool: PgPool) {
    let old = insert_post(&pool, "u1", "Old", 30).await;
    let current = insert_post(&pool, "u1", "Current", 20).await;
    let new = insert_post(&pool, "u1", "New", 10).await;
    insert_post(&pool, "u2", "Foreign", 5).await;
    let repo = PgPostRepository::new(Arc::new(pool));

    let siblings = repo.list_sibling_ids("u1", current).await.unwrap();
    assert_eq!(siblings, vec![new, old]);
    assert_eq!(repo.count().await.unwrap(), 4);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_settings_sections(pool: PgPool) {
    sqlx::query(
        r#"
        INSERT INTO user_settings (id, floating_buttons, redirect, counter, scripts)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind("u1")
    .bind(r#"[{"id":"t","type":"telegram","url":"https://t.me/x","enabled":true}]"#)
    .bind(r#"{"enabled":true,"behavior":"redirect_first","url":"https://ads.example","cookieDuration":120}"#)
    .bind("{broken")
    .bind("[]")
    .execute(&pool)
    .await
    .unwrap();
    let repo = PgSettingsRepository::new(Arc::new(pool));

    let settings = repo.find_by_owner("u1").await.unwrap().unwrap();
    assert_eq!(settings.floating_buttons.len(), 1);
    assert_eq!(settings.redirect.behavior, RedirectBehavior::RedirectFirst);
    assert_eq!(settings.redirect.cookie_duration, 120);
    assert!(settings.counter.counter_key.is_empty());

    assert!(repo.find_by_owner("nobody").await.unwrap().is_none());
}
