//! Handler for watch page events.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::player::{PlayerEventRequest, PlayerEventResponse};
use crate::application::services::PlayerInput;
use crate::error::AppError;
use crate::state::AppState;

/// Runs the player engine for one visitor event.
///
/// # Endpoint
///
/// `POST /api/player/events`
///
/// # Request Body
///
/// ```json
/// {
///   "postId": 1,
///   "event": "play",
///   "playback": "preview",
///   "pageUrl": "https://vid.example/?p=1",
///   "device": { "userAgent": "...", "viewportWidth": 390, "touch": true },
///   "storage": { "cookie": {}, "durable": {"directLinkOpenedTimestamp": "1780000000000"}, "session": null }
/// }
/// ```
///
/// A `null` storage scope means the page could not access that store.
///
/// # Response
///
/// ```json
/// {
///   "playback": "playing",
///   "effects": [
///     { "type": "open_background_tab", "url": "https://ads.example" },
///     { "type": "start_playback" }
///   ],
///   "storage": [
///     { "op": "set", "scope": "cookie", "key": "directLinkOpened", "value": "true", "expires": "..." },
///     { "op": "set", "scope": "durable", "key": "directLinkOpenedTimestamp", "value": "1780000000000" }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 404 Not Found if the post does not exist.
pub async fn player_events_handler(
    State(state): State<AppState>,
    Json(payload): Json<PlayerEventRequest>,
) -> Result<Json<PlayerEventResponse>, AppError> {
    payload.validate()?;

    let bundle = state.post_service.load_bundle(payload.post_id).await?;

    let input = PlayerInput {
        event: payload.event,
        playback: payload.playback,
        page_url: payload.page_url,
        device: payload.device,
        storage: payload.storage,
    };
    let outcome = state
        .player_service
        .handle(&bundle, input, &mut rand::rng());

    Ok(Json(outcome.into()))
}
