//! Preview → playing state machine.

use serde::{Deserialize, Serialize};

/// UI state of one page view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Muted silent loop with a play button.
    #[default]
    Preview,
    /// Native controls and sound. Terminal for the page lifetime.
    Playing,
}

/// Guards the single `preview → playing` transition.
#[derive(Debug, Clone, Default)]
pub struct PlaybackTrigger {
    state: PlaybackState,
}

impl PlaybackTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the state a host already reached.
    pub fn resume(state: PlaybackState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Enters `playing`. Returns false when already there.
    pub fn start(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        self.state = PlaybackState::Playing;
        true
    }
}
