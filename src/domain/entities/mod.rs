//! Core domain entities representing the business data model.
//!
//! Entities are plain data records supplied by the persistence layer. The
//! player engine in [`crate::player`] only reads them.
//!
//! # Entity Types
//!
//! - [`Post`] - A hosted video
//! - [`GlobalSettings`] - Account-wide behavior applied to every post
//! - [`PostBundle`] - Post + settings + sibling post ids, as served to the watch page

pub mod bundle;
pub mod post;
pub mod settings;

pub use bundle::PostBundle;
pub use post::Post;
pub use settings::{
    ButtonKind, CounterConfig, DEFAULT_COOKIE_DURATION_SECS, FloatingButton, GlobalSettings,
    RedirectBehavior, RedirectConfig, ScriptConfig, ScriptPosition,
};
