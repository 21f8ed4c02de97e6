//! Redirect strategy selection.
//!
//! Pure functions: they only look at the configuration, the cooldown flag and
//! the device class. Applying the result is the session's job.

use crate::domain::entities::{RedirectBehavior, RedirectConfig};

use super::device::DeviceClass;

/// What a play click resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Play in place, no side effects.
    PlayNow,
    /// `redirect_first`: send the current tab to `url`, no playback this visit.
    RedirectThenPlay { url: String },
    /// `behind`: open `url` elsewhere and play here right away.
    RedirectBehindThenPlay { url: String, device: DeviceClass },
    /// `front`: send the current tab to `url` and resume playback on return.
    RedirectFrontNavigate { url: String },
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::PlayNow => "play_now",
            Decision::RedirectThenPlay { .. } => "redirect_then_play",
            Decision::RedirectBehindThenPlay { .. } => "redirect_behind_then_play",
            Decision::RedirectFrontNavigate { .. } => "redirect_front_navigate",
        }
    }

    /// Every redirecting decision starts a cooldown window.
    pub fn starts_cooldown(&self) -> bool {
        !matches!(self, Decision::PlayNow)
    }
}

/// Resolves a play click.
///
/// Anything other than an enabled redirect with a url, outside the cooldown
/// window, resolves to [`Decision::PlayNow`].
pub fn select(config: &RedirectConfig, cooldown_active: bool, device: DeviceClass) -> Decision {
    let Some(url) = config.target() else {
        return Decision::PlayNow;
    };
    if cooldown_active {
        return Decision::PlayNow;
    }

    let url = url.to_string();
    match config.behavior {
        RedirectBehavior::RedirectFirst => Decision::RedirectThenPlay { url },
        RedirectBehavior::Behind => Decision::RedirectBehindThenPlay { url, device },
        RedirectBehavior::Front => Decision::RedirectFrontNavigate { url },
        RedirectBehavior::None => Decision::PlayNow,
    }
}

/// Returns the url `redirect_first` sends visitors to on page load, if that rule applies.
pub fn redirect_first_target(config: &RedirectConfig) -> Option<&str> {
    if config.behavior == RedirectBehavior::RedirectFirst {
        config.target()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(behavior: RedirectBehavior) -> RedirectConfig {
        RedirectConfig {
            enabled: true,
            behavior,
            url: "https://ads.example".to_string(),
            cookie_duration: 3600,
        }
    }

    #[test]
    fn test_decision_table_fresh_visitor() {
        let url = "https://ads.example".to_string();

        assert_eq!(
            select(&config(RedirectBehavior::RedirectFirst), false, DeviceClass::Desktop),
            Decision::RedirectThenPlay { url: url.clone() }
        );
        assert_eq!(
            select(&config(RedirectBehavior::Behind), false, DeviceClass::Mobile),
            Decision::RedirectBehindThenPlay {
                url: url.clone(),
                device: DeviceClass::Mobile
            }
        );
        assert_eq!(
            select(&config(RedirectBehavior::Front), false, DeviceClass::Desktop),
            Decision::RedirectFrontNavigate { url }
        );
        assert_eq!(
            select(&config(RedirectBehavior::None), false, DeviceClass::Desktop),
            Decision::PlayNow
        );
    }

    #[test]
    fn test_active_cooldown_always_plays() {
        for behavior in [
            RedirectBehavior::Front,
            RedirectBehavior::Behind,
            RedirectBehavior::RedirectFirst,
            RedirectBehavior::None,
        ] {
            assert_eq!(
                select(&config(behavior), true, DeviceClass::Desktop),
                Decision::PlayNow
            );
        }
    }

    #[test]
    fn test_disabled_or_empty_url_plays() {
        let mut disabled = config(RedirectBehavior::Front);
        disabled.enabled = false;
        assert_eq!(
            select(&disabled, false, DeviceClass::Desktop),
            Decision::PlayNow
        );

        let mut no_url = config(RedirectBehavior::Behind);
        no_url.url.clear();
        assert_eq!(select(&no_url, false, DeviceClass::Mobile), Decision::PlayNow);
    }

    #[test]
    fn test_default_config_plays() {
        assert_eq!(
            select(&RedirectConfig::default(), false, DeviceClass::Desktop),
            Decision::PlayNow
        );
    }

    #[test]
    fn test_redirect_first_target() {
        assert_eq!(
            redirect_first_target(&config(RedirectBehavior::RedirectFirst)),
            Some("https://ads.example")
        );
        assert_eq!(redirect_first_target(&config(RedirectBehavior::Front)), None);

        let mut disabled = config(RedirectBehavior::RedirectFirst);
        disabled.enabled = false;
        assert_eq!(redirect_first_target(&disabled), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Decision::PlayNow.label(), "play_now");
        assert!(!Decision::PlayNow.starts_cooldown());
        assert!(
            Decision::RedirectFrontNavigate {
                url: "x".to_string()
            }
            .starts_cooldown()
        );
    }
}
