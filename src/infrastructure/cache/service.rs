//! Cache service trait and error types.

use async_trait::async_trait;

use crate::domain::entities::PostBundle;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching the bundles served to the watch page.
///
/// Implementations must be thread-safe and fail open: a broken cache degrades
/// to database lookups, it never fails a request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached bundle of a post.
    ///
    /// `Ok(None)` on miss. Production implementations also report backend errors
    /// and undecodable entries as a miss.
    async fn get_bundle(&self, post_id: i64) -> CacheResult<Option<PostBundle>>;

    /// Stores a bundle under its post id.
    ///
    /// `ttl_seconds` of `None` uses the implementation default.
    async fn set_bundle(&self, bundle: &PostBundle, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Drops the cached bundle of a post.
    async fn invalidate(&self, post_id: i64) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
