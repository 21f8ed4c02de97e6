//! DTOs for the public post endpoint.

use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;

/// Query string of `GET /api/public/post`.
///
/// The id stays a string so a missing and a malformed id both surface as
/// validation errors instead of a generic rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PostQuery {
    #[serde(default)]
    pub id: Option<String>,
}

impl PostQuery {
    /// Returns the requested post id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the id is missing, not a number or
    /// not positive.
    pub fn post_id(&self) -> Result<i64, AppError> {
        let raw = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::bad_request("Post id is required", json!({})))?;

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(AppError::bad_request(
                "Invalid post id",
                json!({ "id": raw }),
            )),
        }
    }
}
