//! Side effects the engine asks its host to perform.
//!
//! The engine never touches navigation or the video element itself; it returns
//! effects in the order they must be applied. A browser host executes them, a
//! test host records them.

use serde::Serialize;
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Leave preview: hide the muted loop, show the player with controls and try
    /// to play with sound. A refused autoplay is ignored.
    StartPlayback,
    /// Replace the current page.
    Navigate { url: String },
    /// Open `url` in a new foreground tab.
    OpenTab { url: String },
    /// Open `url` in a new tab, then give focus back to the current one.
    OpenBackgroundTab { url: String },
    /// Run `action` once after `delay`. Not cancelable.
    Defer {
        #[serde_as(as = "DurationMilliSeconds<u64>")]
        #[serde(rename = "delay_ms")]
        delay: Duration,
        action: Deferred,
    },
}

/// Work scheduled through [`Effect::Defer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Deferred {
    StartPlayback,
    Navigate { url: String },
}

impl Effect {
    pub fn navigate(url: impl Into<String>) -> Self {
        Self::Navigate { url: url.into() }
    }

    pub fn defer(delay: Duration, action: Deferred) -> Self {
        Self::Defer { delay, action }
    }
}
