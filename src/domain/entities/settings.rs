//! Account-global settings applied to every post of an owner.
//!
//! Settings arrive as loosely-typed JSON written by the dashboard. Parsing is
//! lenient: a malformed section falls back to its default instead of failing
//! the whole record, and a malformed list entry is skipped. In particular a
//! broken `redirect` section behaves exactly like `behavior = none`.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, VecSkipError, serde_as};

/// Cooldown applied when the stored redirect config omits `cookieDuration` (24h).
pub const DEFAULT_COOKIE_DURATION_SECS: u64 = 86_400;

/// Settings shared by all posts of one account.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub floating_buttons: Vec<FloatingButton>,
    #[serde_as(as = "DefaultOnError")]
    pub redirect: RedirectConfig,
    #[serde_as(as = "DefaultOnError")]
    pub counter: CounterConfig,
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub scripts: Vec<ScriptConfig>,
}

/// Redirect strategy relative to video playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectBehavior {
    /// Navigate the current tab to the redirect, auto-play when the visitor comes back.
    Front,
    /// Open the redirect in another tab and play immediately.
    Behind,
    /// Redirect before any playback; only a returning visitor sees the video.
    RedirectFirst,
    /// No redirect. Unknown values map here.
    #[default]
    #[serde(other)]
    None,
}

impl RedirectBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Behind => "behind",
            Self::RedirectFirst => "redirect_first",
            Self::None => "none",
        }
    }
}

/// Monetized redirect ("direct link") configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedirectConfig {
    pub enabled: bool,
    pub behavior: RedirectBehavior,
    pub url: String,
    /// Seconds during which a visitor is not redirected again.
    pub cookie_duration: u64,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            behavior: RedirectBehavior::None,
            url: String::new(),
            cookie_duration: DEFAULT_COOKIE_DURATION_SECS,
        }
    }
}

impl RedirectConfig {
    /// Returns the redirect destination when a redirect may fire at all.
    ///
    /// `None` when the redirect is disabled or the url is empty, whatever the behavior.
    pub fn target(&self) -> Option<&str> {
        if self.enabled && !self.url.is_empty() {
            Some(&self.url)
        } else {
            None
        }
    }
}

/// Kind of floating share button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    Telegram,
    Whatsapp,
    Facebook,
    Share,
}

impl ButtonKind {
    /// Display order on the watch page.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Telegram => 0,
            Self::Whatsapp => 1,
            Self::Facebook => 2,
            Self::Share => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Telegram => "telegram",
            Self::Whatsapp => "whatsapp",
            Self::Facebook => "facebook",
            Self::Share => "share",
        }
    }
}

/// A floating button rendered on the right edge of the watch page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingButton {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ButtonKind,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub enabled: bool,
}

/// whos.amung.us visitor counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CounterConfig {
    pub enabled: bool,
    pub counter_key: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            counter_key: String::new(),
        }
    }
}

/// Where a custom script is injected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPosition {
    Head,
    BodyStart,
    #[default]
    #[serde(other)]
    BodyEnd,
}

/// User-supplied script injected into every watch page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    pub id: String,
    pub name: String,
    pub content: String,
    pub position: ScriptPosition,
    pub enabled: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            content: String::new(),
            position: ScriptPosition::BodyEnd,
            enabled: true,
        }
    }
}
