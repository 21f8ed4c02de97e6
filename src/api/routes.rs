//! API route configuration.

use crate::api::handlers::{player_events_handler, public_post_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public API routes used by the watch page.
///
/// # Endpoints
///
/// - `GET  /public/post`    - Post bundle (`?id=<id>`)
/// - `POST /player/events`  - Player engine run for one visitor event
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/public/post", get(public_post_handler))
        .route("/player/events", post(player_events_handler))
}
