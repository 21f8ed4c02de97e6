#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use chrono::{TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::Arc;
use vidlink::api;
use vidlink::api::handlers::health_handler;
use vidlink::application::services::{PlayerService, PostService};
use vidlink::domain::entities::{GlobalSettings, Post, RedirectBehavior, RedirectConfig};
use vidlink::domain::repositories::{PostRepository, SettingsRepository};
use vidlink::error::AppError;
use vidlink::infrastructure::cache::NullCache;
use vidlink::player::{
    Clock, DeviceClass, Effect, FixedClassifier, ManualClock, MemoryStorage, PageContext,
    PlaybackState, PlayerSession, Timing, VisitorEvent,
};
use vidlink::state::AppState;
use vidlink::web;

pub const ADS: &str = "https://ads.example";
pub const OWNER: &str = "owner-1";

pub fn start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap()
}

pub fn post(id: i64, title: &str) -> Post {
    Post::new(
        id,
        OWNER.to_string(),
        title.to_string(),
        format!("https://cdn.example/{id}.mp4"),
        String::new(),
        false,
        start(),
        start(),
    )
}

pub fn redirect(behavior: RedirectBehavior, cookie_duration: u64) -> RedirectConfig {
    RedirectConfig {
        enabled: true,
        behavior,
        url: ADS.to_string(),
        cookie_duration,
    }
}

/// Posts held in memory.
#[derive(Default)]
pub struct InMemoryPosts {
    posts: Vec<Post>,
}

impl InMemoryPosts {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        Ok(self.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list_sibling_ids(
        &self,
        owner_id: &str,
        exclude_id: i64,
    ) -> Result<Vec<i64>, AppError> {
        Ok(self
            .posts
            .iter()
            .filter(|p| p.owner_id == owner_id && p.id != exclude_id)
            .map(|p| p.id)
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.posts.len() as i64)
    }
}

/// Settings keyed by owner.
#[derive(Default)]
pub struct InMemorySettings {
    by_owner: HashMap<String, GlobalSettings>,
}

impl InMemorySettings {
    pub fn with(owner: &str, settings: GlobalSettings) -> Self {
        let mut by_owner = HashMap::new();
        by_owner.insert(owner.to_string(), settings);
        Self { by_owner }
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettings {
    async fn find_by_owner(&self, owner_id: &str) -> Result<Option<GlobalSettings>, AppError> {
        Ok(self.by_owner.get(owner_id).cloned())
    }
}

/// A repository whose database is down.
pub struct BrokenPosts;

#[async_trait]
impl PostRepository for BrokenPosts {
    async fn find_by_id(&self, _id: i64) -> Result<Option<Post>, AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn list_sibling_ids(
        &self,
        _owner_id: &str,
        _exclude_id: i64,
    ) -> Result<Vec<i64>, AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

/// State over in-memory repositories, a fixed clock and a desktop classifier.
pub fn create_test_state(
    posts: Arc<dyn PostRepository>,
    settings: GlobalSettings,
    device: DeviceClass,
) -> (AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start()));
    let post_service = PostService::new(
        posts,
        Arc::new(InMemorySettings::with(OWNER, settings)),
        Arc::new(NullCache::new()),
    );
    let player_service = PlayerService::new(
        Arc::new(FixedClassifier(device)),
        clock.clone(),
        Timing::default(),
    );

    let state = AppState::new(Arc::new(post_service), Arc::new(player_service))
        .with_public_base_url(Some("https://vid.example".to_string()));
    (state, clock)
}

/// Every route without rate limiting, which needs a peer address.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::public_routes())
        .merge(web::routes::watch_routes())
        .with_state(state)
}

/// One browser profile visiting a post, applying engine effects in memory.
///
/// Deferred effects fire right after the clock is advanced by their delay.
pub struct Browser {
    pub clock: Arc<ManualClock>,
    pub storage: MemoryStorage,
    pub page: PageContext,
    pub device: DeviceClass,
    pub playback: PlaybackState,
    pub plays: usize,
    pub opened: Vec<String>,
    pub navigations: Vec<String>,
    rng: StdRng,
}

impl Browser {
    pub fn new(redirect: RedirectConfig, device: DeviceClass) -> Self {
        Self::with_others(redirect, device, vec![2, 3, 5])
    }

    pub fn with_others(redirect: RedirectConfig, device: DeviceClass, others: Vec<i64>) -> Self {
        let clock = Arc::new(ManualClock::new(start()));
        Self {
            storage: MemoryStorage::new(clock.clone()),
            clock,
            page: PageContext {
                post_id: 1,
                page_url: "https://vid.example/?p=1".to_string(),
                redirect,
                other_posts: others,
            },
            device,
            playback: PlaybackState::Preview,
            plays: 0,
            opened: Vec::new(),
            navigations: Vec::new(),
            rng: StdRng::seed_from_u64(11),
        }
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }

    /// A fresh page view. Returns every effect applied, deferred ones included.
    pub fn load(&mut self) -> Vec<Effect> {
        self.playback = PlaybackState::Preview;
        self.dispatch(VisitorEvent::Load)
    }

    pub fn click_play(&mut self) -> Vec<Effect> {
        self.dispatch(VisitorEvent::Play)
    }

    pub fn finish_video(&mut self) -> Vec<Effect> {
        self.dispatch(VisitorEvent::Ended)
    }

    pub fn wait_secs(&mut self, secs: u64) {
        self.clock.advance(std::time::Duration::from_secs(secs));
    }

    fn dispatch(&mut self, event: VisitorEvent) -> Vec<Effect> {
        let mut session = PlayerSession::new(
            self.page.clone(),
            &mut self.storage,
            self.clock.clone(),
            Timing::default(),
        )
        .with_playback(self.playback);

        let mut applied = Vec::new();
        for effect in session.handle(event, self.device, &mut self.rng) {
            if let Effect::Defer { delay, action } = &effect {
                self.clock.advance(*delay);
                let fired = session.fire(action.clone());
                applied.push(effect);
                applied.extend(fired);
            } else {
                applied.push(effect);
            }
        }
        self.playback = session.playback();
        drop(session);

        for effect in &applied {
            match effect {
                Effect::StartPlayback => self.plays += 1,
                Effect::Navigate { url } => self.navigations.push(url.clone()),
                Effect::OpenTab { url } | Effect::OpenBackgroundTab { url } => {
                    self.opened.push(url.clone())
                }
                Effect::Defer { .. } => {}
            }
        }
        applied
    }
}
