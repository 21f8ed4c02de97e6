//! Everything the watch page needs to render one post.

use serde::{Deserialize, Serialize};

use super::{GlobalSettings, Post};

/// A post together with its owner's settings and sibling posts.
///
/// `other_posts` never contains `post.id`; it feeds the end-of-playback router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBundle {
    pub post: Post,
    pub settings: GlobalSettings,
    pub other_posts: Vec<i64>,
}

impl PostBundle {
    pub fn new(post: Post, settings: GlobalSettings, mut other_posts: Vec<i64>) -> Self {
        other_posts.retain(|id| *id != post.id);
        Self {
            post,
            settings,
            other_posts,
        }
    }
}
