//! Watch page routes.

use crate::state::AppState;
use crate::web::handlers::{watch_handler, watch_path_handler};
use axum::{Router, routing::get};

/// Public watch page routes.
///
/// # Endpoints
///
/// - `GET /?p={id}` - Watch page for a post
/// - `GET /p/{id}` - Same page under a path segment
pub fn watch_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(watch_handler))
        .route("/p/{id}", get(watch_path_handler))
}
