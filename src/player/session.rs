//! One page view of a post, driven by discrete visitor events.

use metrics::counter;
use rand::Rng;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::domain::entities::RedirectConfig;

use super::clock::Clock;
use super::cooldown::CooldownTracker;
use super::device::DeviceClass;
use super::effect::{Deferred, Effect};
use super::playback::{PlaybackState, PlaybackTrigger};
use super::resume::{self, LoadAction};
use super::routing;
use super::storage::VisitorStorage;
use super::strategy::{self, Decision};

/// Delays used by deferred effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Wait before auto-play on load, so the page can finish rendering.
    pub resume_delay: Duration,
    /// Wait before the original tab leaves in mobile `behind` mode.
    pub behind_navigate_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            resume_delay: Duration::from_millis(500),
            behind_navigate_delay: Duration::from_millis(300),
        }
    }
}

/// A visitor event the page reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitorEvent {
    Load,
    Play,
    Ended,
}

/// What the engine knows about the page being viewed.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub post_id: i64,
    /// Absolute URL of the page, reopened in a new tab by mobile `behind`.
    pub page_url: String,
    pub redirect: RedirectConfig,
    pub other_posts: Vec<i64>,
}

/// The player engine for one page view.
///
/// Each handler takes one event, updates visitor storage and returns the
/// effects the host must apply, in order.
pub struct PlayerSession<S: VisitorStorage> {
    page: PageContext,
    storage: S,
    clock: Arc<dyn Clock>,
    timing: Timing,
    trigger: PlaybackTrigger,
}

impl<S: VisitorStorage> PlayerSession<S> {
    pub fn new(page: PageContext, storage: S, clock: Arc<dyn Clock>, timing: Timing) -> Self {
        Self {
            page,
            storage,
            clock,
            timing,
            trigger: PlaybackTrigger::new(),
        }
    }

    /// Continues a page view whose playback state the host already reached.
    pub fn with_playback(mut self, state: PlaybackState) -> Self {
        self.trigger = PlaybackTrigger::resume(state);
        self
    }

    pub fn playback(&self) -> PlaybackState {
        self.trigger.state()
    }

    pub fn page(&self) -> &PageContext {
        &self.page
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Dispatches one visitor event to its handler.
    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        event: VisitorEvent,
        device: DeviceClass,
        rng: &mut R,
    ) -> Vec<Effect> {
        match event {
            VisitorEvent::Load => self.on_load(),
            VisitorEvent::Play => self.on_play_click(device),
            VisitorEvent::Ended => self.on_ended(rng),
        }
    }

    /// Page load: return-trip resume and the `redirect_first` load rule.
    pub fn on_load(&mut self) -> Vec<Effect> {
        counter!("player_events_total", "event" => "load").increment(1);

        let returning = resume::take(&mut self.storage);
        let storage = &mut self.storage;
        let clock = self.clock.as_ref();
        let window = self.page.redirect.cookie_duration;
        let actions = resume::plan_load(&self.page.redirect, returning, || {
            CooldownTracker::new(storage, clock, window).is_active()
        });

        let mut effects = Vec::new();
        for action in actions {
            match action {
                LoadAction::ResumePlayback => {
                    if !self.trigger.is_playing() {
                        effects.push(Effect::defer(
                            self.timing.resume_delay,
                            Deferred::StartPlayback,
                        ));
                    }
                }
                LoadAction::RedirectAway { url } => {
                    self.cooldown().mark_active();
                    effects.push(Effect::navigate(url));
                }
            }
        }

        debug!(
            post_id = self.page.post_id,
            returning,
            effects = effects.len(),
            "Page load handled"
        );
        effects
    }

    /// Play click: resolves the redirect strategy and applies it.
    pub fn on_play_click(&mut self, device: DeviceClass) -> Vec<Effect> {
        counter!("player_events_total", "event" => "play").increment(1);

        if self.trigger.is_playing() {
            return Vec::new();
        }

        let cooldown_active = self.cooldown().is_active();
        let decision = strategy::select(&self.page.redirect, cooldown_active, device);

        debug!(
            post_id = self.page.post_id,
            cooldown_active,
            decision = decision.label(),
            "Play click resolved"
        );
        counter!("player_decisions_total", "decision" => decision.label()).increment(1);

        if decision.starts_cooldown() {
            self.cooldown().mark_active();
        }

        match decision {
            Decision::PlayNow => self.start_playback().into_iter().collect(),
            Decision::RedirectThenPlay { url } => vec![Effect::navigate(url)],
            Decision::RedirectBehindThenPlay { url, device } => {
                let mut effects = match device {
                    DeviceClass::Desktop => vec![Effect::OpenBackgroundTab { url }],
                    DeviceClass::Mobile => vec![
                        Effect::OpenTab {
                            url: self.page.page_url.clone(),
                        },
                        Effect::defer(
                            self.timing.behind_navigate_delay,
                            Deferred::Navigate { url },
                        ),
                    ],
                };
                effects.extend(self.start_playback());
                effects
            }
            Decision::RedirectFrontNavigate { url } => {
                resume::arm(&mut self.storage);
                vec![Effect::navigate(url)]
            }
        }
    }

    /// Playback finished: move on to a random sibling post, if any.
    pub fn on_ended<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Effect> {
        counter!("player_events_total", "event" => "ended").increment(1);

        match routing::next_post(&self.page.other_posts, self.page.post_id, rng) {
            Some(next) => {
                debug!(from = self.page.post_id, to = next, "Routing to next post");
                vec![Effect::navigate(routing::post_url(next))]
            }
            None => Vec::new(),
        }
    }

    /// Runs a deferred action once its delay elapsed.
    pub fn fire(&mut self, action: Deferred) -> Vec<Effect> {
        match action {
            Deferred::StartPlayback => self.start_playback().into_iter().collect(),
            Deferred::Navigate { url } => vec![Effect::navigate(url)],
        }
    }

    fn start_playback(&mut self) -> Option<Effect> {
        self.trigger.start().then_some(Effect::StartPlayback)
    }

    fn cooldown(&mut self) -> CooldownTracker<'_, S> {
        CooldownTracker::new(
            &mut self.storage,
            self.clock.as_ref(),
            self.page.redirect.cookie_duration,
        )
    }
}
