//! HTTP request handlers for API endpoints.

pub mod health;
pub mod player;
pub mod post;

pub use health::health_handler;
pub use player::player_events_handler;
pub use post::public_post_handler;
