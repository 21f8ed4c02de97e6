//! PostgreSQL repository implementations.
//!
//! # Repositories
//!
//! - [`PgPostRepository`] - Post lookups
//! - [`PgSettingsRepository`] - Account settings stored as JSON sections

pub mod pg_post_repository;
pub mod pg_settings_repository;

pub use pg_post_repository::PgPostRepository;
pub use pg_settings_repository::PgSettingsRepository;
