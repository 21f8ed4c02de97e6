//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Posts, account settings and the post bundle
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. The redirect engine that consumes these records lives in
//! [`crate::player`].

pub mod entities;
pub mod repositories;
