//! PostgreSQL implementation of post repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Post;
use crate::domain::repositories::PostRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: String,
    title: String,
    video_url: String,
    thumbnail_url: String,
    is_hls: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Post::new(
            r.id,
            r.user_id,
            r.title,
            r.video_url,
            r.thumbnail_url,
            r.is_hls,
            r.created_at,
            r.updated_at,
        )
    }
}

/// PostgreSQL repository for post lookups.
pub struct PgPostRepository {
    pool: Arc<PgPool>,
}

impl PgPostRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, title, video_url, thumbnail_url, is_hls, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Post::from))
    }

    async fn list_sibling_ids(
        &self,
        owner_id: &str,
        exclude_id: i64,
    ) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM posts
            WHERE user_id = $1 AND id <> $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .bind(exclude_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
