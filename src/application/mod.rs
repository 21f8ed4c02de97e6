//! Application layer services.
//!
//! Services orchestrate repository calls and the cache, and give HTTP handlers
//! a small API.
//!
//! # Available Services
//!
//! - [`services::post_service::PostService`] - Post bundles for the watch page
//! - [`services::player_service::PlayerService`] - Player engine runs for page events

pub mod services;
