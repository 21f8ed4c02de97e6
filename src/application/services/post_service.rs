//! Post bundle loading for the watch page.

use metrics::counter;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::PostBundle;
use crate::domain::repositories::{PostRepository, SettingsRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Assembles [`PostBundle`]s from the repositories, with a read-through cache.
///
/// Cache failures never fail a request: a broken cache degrades to database
/// lookups.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    settings: Arc<dyn SettingsRepository>,
    cache: Arc<dyn CacheService>,
    cache_ttl: Option<u64>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        settings: Arc<dyn SettingsRepository>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            posts,
            settings,
            cache,
            cache_ttl: None,
        }
    }

    /// Overrides the cache's default TTL for bundles.
    pub fn with_cache_ttl(mut self, ttl_seconds: u64) -> Self {
        self.cache_ttl = Some(ttl_seconds);
        self
    }

    /// Loads everything the watch page needs for one post.
    ///
    /// Owners without saved settings get [`GlobalSettings::default`](crate::domain::entities::GlobalSettings::default),
    /// which never redirects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn load_bundle(&self, post_id: i64) -> Result<PostBundle, AppError> {
        match self.cache.get_bundle(post_id).await {
            Ok(Some(bundle)) => {
                counter!("post_bundle_cache_total", "result" => "hit").increment(1);
                return Ok(bundle);
            }
            Ok(None) => {
                counter!("post_bundle_cache_total", "result" => "miss").increment(1);
            }
            Err(e) => {
                counter!("post_bundle_cache_total", "result" => "error").increment(1);
                warn!("Cache read failed for post {}: {}", post_id, e);
            }
        }

        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "id": post_id })))?;

        let settings = self
            .settings
            .find_by_owner(&post.owner_id)
            .await?
            .unwrap_or_default();
        let siblings = self.posts.list_sibling_ids(&post.owner_id, post.id).await?;

        let bundle = PostBundle::new(post, settings, siblings);
        debug!(
            post_id,
            other_posts = bundle.other_posts.len(),
            "Bundle loaded from database"
        );

        if let Err(e) = self.cache.set_bundle(&bundle, self.cache_ttl).await {
            warn!("Cache write failed for post {}: {}", post_id, e);
        }

        Ok(bundle)
    }

    /// Drops a post's cached bundle so the next load reads the database.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the cache rejects the request.
    pub async fn invalidate(&self, post_id: i64) -> Result<(), AppError> {
        self.cache.invalidate(post_id).await.map_err(|e| {
            AppError::internal("Cache error", json!({ "reason": e.to_string() }))
        })
    }

    /// Verifies the database answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn check_database(&self) -> Result<i64, AppError> {
        self.posts.count().await
    }

    /// Reports whether the cache backend is reachable.
    pub async fn check_cache(&self) -> bool {
        self.cache.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{GlobalSettings, Post, RedirectBehavior, RedirectConfig};
    use crate::domain::repositories::{MockPostRepository, MockSettingsRepository};
    use crate::infrastructure::cache::{CacheError, MockCacheService, NullCache};
    use chrono::Utc;

    fn create_test_post(id: i64, owner: &str) -> Post {
        let now = Utc::now();
        Post::new(
            id,
            owner.to_string(),
            format!("Clip {id}"),
            format!("https://cdn.example/{id}.mp4"),
            String::new(),
            false,
            now,
            now,
        )
    }

    fn front_settings() -> GlobalSettings {
        GlobalSettings {
            redirect: RedirectConfig {
                enabled: true,
                behavior: RedirectBehavior::Front,
                url: "https://ads.example".to_string(),
                cookie_duration: 3600,
            },
            ..GlobalSettings::default()
        }
    }

    #[tokio::test]
    async fn test_load_bundle_from_database() {
        let mut posts = MockPostRepository::new();
        let mut settings = MockSettingsRepository::new();

        posts
            .expect_find_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(Some(create_test_post(1, "owner-a"))));
        posts
            .expect_list_sibling_ids()
            .withf(|owner, exclude| owner == "owner-a" && *exclude == 1)
            .times(1)
            .returning(|_, _| Ok(vec![5, 3, 2]));
        settings
            .expect_find_by_owner()
            .times(1)
            .returning(|_| Ok(Some(front_settings())));

        let service = PostService::new(
            Arc::new(posts),
            Arc::new(settings),
            Arc::new(NullCache::new()),
        );

        let bundle = service.load_bundle(1).await.unwrap();

        assert_eq!(bundle.post.id, 1);
        assert_eq!(bundle.other_posts, vec![5, 3, 2]);
        assert_eq!(bundle.settings.redirect.behavior, RedirectBehavior::Front);
    }

    #[tokio::test]
    async fn test_load_bundle_not_found() {
        let mut posts = MockPostRepository::new();
        posts.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = PostService::new(
            Arc::new(posts),
            Arc::new(MockSettingsRepository::new()),
            Arc::new(NullCache::new()),
        );

        let result = service.load_bundle(404).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_missing_settings_use_defaults() {
        let mut posts = MockPostRepository::new();
        let mut settings = MockSettingsRepository::new();

        posts
            .expect_find_by_id()
            .returning(|_| Ok(Some(create_test_post(7, "owner-b"))));
        posts.expect_list_sibling_ids().returning(|_, _| Ok(vec![]));
        settings.expect_find_by_owner().returning(|_| Ok(None));

        let service = PostService::new(
            Arc::new(posts),
            Arc::new(settings),
            Arc::new(NullCache::new()),
        );

        let bundle = service.load_bundle(7).await.unwrap();

        assert_eq!(bundle.settings, GlobalSettings::default());
        assert!(bundle.settings.redirect.target().is_none());
        assert!(bundle.other_posts.is_empty());
    }

    #[tokio::test]
    async fn test_cache_hit_skips_database() {
        let mut cache = MockCacheService::new();
        let cached = PostBundle::new(create_test_post(3, "owner-c"), front_settings(), vec![4]);
        cache
            .expect_get_bundle()
            .withf(|id| *id == 3)
            .times(1)
            .returning(move |_| Ok(Some(cached.clone())));

        let mut posts = MockPostRepository::new();
        posts.expect_find_by_id().never();

        let service = PostService::new(
            Arc::new(posts),
            Arc::new(MockSettingsRepository::new()),
            Arc::new(cache),
        );

        let bundle = service.load_bundle(3).await.unwrap();
        assert_eq!(bundle.other_posts, vec![4]);
    }

    #[tokio::test]
    async fn test_cache_errors_fall_back_to_database() {
        let mut cache = MockCacheService::new();
        cache
            .expect_get_bundle()
            .returning(|_| Err(CacheError::OperationError("down".to_string())));
        cache
            .expect_set_bundle()
            .withf(|bundle, ttl| bundle.post.id == 2 && *ttl == Some(60))
            .times(1)
            .returning(|_, _| Err(CacheError::OperationError("down".to_string())));

        let mut posts = MockPostRepository::new();
        let mut settings = MockSettingsRepository::new();
        posts
            .expect_find_by_id()
            .returning(|_| Ok(Some(create_test_post(2, "owner-d"))));
        posts.expect_list_sibling_ids().returning(|_, _| Ok(vec![9]));
        settings.expect_find_by_owner().returning(|_| Ok(None));

        let service = PostService::new(Arc::new(posts), Arc::new(settings), Arc::new(cache))
            .with_cache_ttl(60);

        let bundle = service.load_bundle(2).await.unwrap();
        assert_eq!(bundle.other_posts, vec![9]);
    }

    #[tokio::test]
    async fn test_database_error_propagates() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_id()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = PostService::new(
            Arc::new(posts),
            Arc::new(MockSettingsRepository::new()),
            Arc::new(NullCache::new()),
        );

        assert!(matches!(
            service.load_bundle(1).await,
            Err(AppError::Internal { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalidate_drops_cached_bundle() {
        let mut cache = MockCacheService::new();
        cache
            .expect_invalidate()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(()));

        let service = PostService::new(
            Arc::new(MockPostRepository::new()),
            Arc::new(MockSettingsRepository::new()),
            Arc::new(cache),
        );

        assert!(service.invalidate(7).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalidate_reports_cache_errors() {
        let mut cache = MockCacheService::new();
        cache
            .expect_invalidate()
            .returning(|_| Err(CacheError::ConnectionError("refused".to_string())));

        let service = PostService::new(
            Arc::new(MockPostRepository::new()),
            Arc::new(MockSettingsRepository::new()),
            Arc::new(cache),
        );

        assert!(matches!(
            service.invalidate(7).await,
            Err(AppError::Internal { .. })
        ));
    }
}
