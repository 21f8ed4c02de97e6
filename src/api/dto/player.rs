//! DTOs for the player event endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::PlayerOutcome;
use crate::player::{DeviceProfile, Effect, PlaybackState, StorageOp, StorageSnapshot, VisitorEvent};

/// Body of `POST /api/player/events`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEventRequest {
    #[validate(range(min = 1, message = "Post id must be positive"))]
    pub post_id: i64,

    pub event: VisitorEvent,

    /// State the page is currently in.
    #[serde(default)]
    pub playback: PlaybackState,

    /// `location.href` of the watch page.
    #[validate(url(message = "Invalid page URL"))]
    #[validate(length(max = 2048))]
    pub page_url: String,

    #[serde(default)]
    pub device: DeviceProfile,

    /// What the page could read from its stores.
    #[serde(default)]
    pub storage: StorageSnapshot,
}

/// Effects and storage writes the page applies, in order.
#[derive(Debug, Serialize)]
pub struct PlayerEventResponse {
    pub playback: PlaybackState,
    pub effects: Vec<Effect>,
    pub storage: Vec<StorageOp>,
}

impl From<PlayerOutcome> for PlayerEventResponse {
    fn from(outcome: PlayerOutcome) -> Self {
        Self {
            playback: outcome.playback,
            effects: outcome.effects,
            storage: outcome.storage,
        }
    }
}
