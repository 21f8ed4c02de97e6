//! Handler for the public post endpoint.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::post::PostQuery;
use crate::domain::entities::PostBundle;
use crate::error::AppError;
use crate::state::AppState;

/// Returns everything a watch page needs to render a post.
///
/// # Endpoint
///
/// `GET /api/public/post?id=<id>`
///
/// # Response
///
/// ```json
/// {
///   "post": { "id": 1, "title": "Clip", "videoUrl": "...", "isHLS": false, ... },
///   "settings": { "floatingButtons": [], "redirect": { ... }, "counter": { ... }, "scripts": [] },
///   "otherPosts": [2, 3]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the id is missing or malformed.
/// Returns 404 Not Found if the post does not exist.
pub async fn public_post_handler(
    State(state): State<AppState>,
    Query(query): Query<PostQuery>,
) -> Result<Json<PostBundle>, AppError> {
    let post_id = query.post_id()?;
    let bundle = state.post_service.load_bundle(post_id).await?;

    Ok(Json(bundle))
}
