//! Server-rendered watch page.
//!
//! The page embeds a small script that reads the visitor's browser stores,
//! reports `load`, `play` and `ended` to `/api/player/events` and applies the
//! returned effects and storage writes. Uses Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`page`] - View model computed from a [`crate::domain::entities::PostBundle`]
//! - [`routes`] - Watch page route configuration

pub mod handlers;
pub mod page;
pub mod routes;
