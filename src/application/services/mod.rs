//! Business logic services for the application layer.

pub mod player_service;
pub mod post_service;

pub use player_service::{PlayerInput, PlayerOutcome, PlayerService};
pub use post_service::PostService;
