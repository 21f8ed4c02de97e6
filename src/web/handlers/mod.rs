//! HTML handlers for the public watch page.

mod watch;

pub use watch::{watch_handler, watch_path_handler};
