//! Request helpers shared by the API and web layers.
//!
//! - [`origin`] - Public origin from configuration or request headers

pub mod origin;
