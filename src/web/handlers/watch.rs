//! Watch page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::player::routing::post_url;
use crate::state::AppState;
use crate::utils::origin::request_origin;
use crate::web::page::WatchPage;

const NO_POST_MESSAGE: &str = "Pagina no encontrada";
const UNKNOWN_POST_MESSAGE: &str = "Contenido no disponible";

#[derive(Debug, Deserialize)]
pub struct WatchQuery {
    pub p: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "watch.html")]
pub struct WatchTemplate {
    pub page: WatchPage,
}

#[derive(Template, WebTemplate)]
#[template(path = "unavailable.html")]
pub struct UnavailableTemplate {
    pub message: &'static str,
}

fn unavailable(message: &'static str) -> Response {
    (StatusCode::NOT_FOUND, UnavailableTemplate { message }).into_response()
}

/// Renders the watch page for `?p=<id>`.
///
/// # Endpoint
///
/// `GET /?p=<id>`
///
/// Answers 404 with a "not found" page when the id is missing or malformed and
/// with a "not available" page when the post does not exist.
pub async fn watch_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<WatchQuery>,
) -> Result<Response, AppError> {
    let post_id = query
        .p
        .as_deref()
        .map(str::trim)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0);

    render(&state, &headers, post_id).await
}

/// Same page under a path segment: `GET /p/{id}`.
pub async fn watch_path_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw): Path<String>,
) -> Result<Response, AppError> {
    let post_id = raw.trim().parse::<i64>().ok().filter(|id| *id > 0);

    render(&state, &headers, post_id).await
}

async fn render(
    state: &AppState,
    headers: &HeaderMap,
    post_id: Option<i64>,
) -> Result<Response, AppError> {
    let Some(post_id) = post_id else {
        return Ok(unavailable(NO_POST_MESSAGE));
    };

    let bundle = match state.post_service.load_bundle(post_id).await {
        Ok(bundle) => bundle,
        Err(AppError::NotFound { .. }) => {
            debug!(post_id, "Watch page for unknown post");
            return Ok(unavailable(UNKNOWN_POST_MESSAGE));
        }
        Err(e) => return Err(e),
    };

    let origin = match &state.public_base_url {
        Some(base) => base.clone(),
        None => request_origin(headers, state.behind_proxy)?,
    };
    let page_url = format!("{}{}", origin, post_url(post_id));

    Ok(WatchTemplate {
        page: WatchPage::build(&bundle, &page_url),
    }
    .into_response())
}
