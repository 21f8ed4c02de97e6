//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data lookups; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`PostRepository`] - Post lookups and sibling listing
//! - [`SettingsRepository`] - Account settings

pub mod post_repository;
pub mod settings_repository;

pub use post_repository::PostRepository;
pub use settings_repository::SettingsRepository;

#[cfg(test)]
pub use post_repository::MockPostRepository;
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
