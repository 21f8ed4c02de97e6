//! Repository trait for post lookups.

use crate::domain::entities::Post;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to hosted posts.
///
/// Post creation and editing belong to the dashboard; the watch page only
/// needs lookups.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPostRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Finds a post by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Lists ids of the owner's other posts, newest first.
    ///
    /// The post identified by `exclude_id` is never part of the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_sibling_ids(&self, owner_id: &str, exclude_id: i64)
    -> Result<Vec<i64>, AppError>;

    /// Counts all posts. Used by the health check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
