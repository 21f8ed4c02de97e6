//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{PlayerService, PostService};

#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<PostService>,
    pub player_service: Arc<PlayerService>,
    /// Fixed origin for page URLs. `None` derives it from request headers.
    pub public_base_url: Option<String>,
    /// Trust `X-Forwarded-*` headers.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(post_service: Arc<PostService>, player_service: Arc<PlayerService>) -> Self {
        Self {
            post_service,
            player_service,
            public_base_url: None,
            behind_proxy: false,
        }
    }

    pub fn with_public_base_url(mut self, base: Option<String>) -> Self {
        self.public_base_url = base;
        self
    }

    pub fn with_behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }
}
