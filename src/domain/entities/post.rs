//! Post entity representing one hosted video.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hosted video entry with its own shareable URL.
///
/// Posts only carry video-specific data. Account-wide behavior (redirect rules,
/// floating buttons, counters, scripts) lives in
/// [`GlobalSettings`](super::GlobalSettings) and applies to every post of the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub title: String,
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(rename = "isHLS")]
    pub is_hls: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Creates a new Post instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        owner_id: String,
        title: String,
        video_url: String,
        thumbnail_url: String,
        is_hls: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            video_url,
            thumbnail_url,
            is_hls,
            created_at,
            updated_at,
        }
    }

    /// Title shown to visitors; untitled posts fall back to `"Video"`.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Video"
        } else {
            &self.title
        }
    }
}
