//! Return-trip signal and the page-load rules built on it.

use tracing::{debug, warn};

use crate::domain::entities::RedirectConfig;

use super::storage::{RETURN_TRIP_KEY, Scope, VisitorStorage};
use super::strategy;

const SIGNAL_VALUE: &str = "1";

/// Sets the one-shot flag read by the next load of the page.
pub fn arm<S: VisitorStorage + ?Sized>(storage: &mut S) {
    if let Err(e) = storage.set(Scope::Session, RETURN_TRIP_KEY, SIGNAL_VALUE, None) {
        warn!("Failed to arm return trip: {}", e);
    }
}

/// Reads and clears the return-trip flag. Unreadable storage reads as absent.
pub fn take<S: VisitorStorage + ?Sized>(storage: &mut S) -> bool {
    match storage.get(Scope::Session, RETURN_TRIP_KEY) {
        Ok(Some(value)) if value == SIGNAL_VALUE => {
            if let Err(e) = storage.remove(Scope::Session, RETURN_TRIP_KEY) {
                warn!("Failed to clear return trip: {}", e);
            }
            true
        }
        Ok(_) => false,
        Err(e) => {
            debug!("Return trip unreadable: {}", e);
            false
        }
    }
}

/// What a page load must do before the visitor interacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadAction {
    /// Start playback after the resume delay.
    ResumePlayback,
    /// Start a cooldown and leave for `url` immediately.
    RedirectAway { url: String },
}

/// Plans a page load.
///
/// `cooldown_active` is only consulted when the `redirect_first` rule applies,
/// since reading the cooldown may clear expired state.
pub fn plan_load(
    config: &RedirectConfig,
    returning: bool,
    cooldown_active: impl FnOnce() -> bool,
) -> Vec<LoadAction> {
    let mut actions = Vec::new();
    if returning {
        actions.push(LoadAction::ResumePlayback);
    }

    if let Some(url) = strategy::redirect_first_target(config) {
        if cooldown_active() {
            if !returning {
                actions.push(LoadAction::ResumePlayback);
            }
        } else {
            actions.push(LoadAction::RedirectAway {
                url: url.to_string(),
            });
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RedirectBehavior;
    use crate::player::snapshot::{SnapshotStorage, StorageSnapshot};

    fn config(behavior: RedirectBehavior) -> RedirectConfig {
        RedirectConfig {
            enabled: true,
            behavior,
            url: "https://ads.example".to_string(),
            cookie_duration: 60,
        }
    }

    #[test]
    fn test_arm_then_take_once() {
        let mut storage = SnapshotStorage::new(StorageSnapshot::default());

        arm(&mut storage);
        assert!(take(&mut storage));
        assert!(!take(&mut storage));
    }

    #[test]
    fn test_take_ignores_other_values() {
        let mut snapshot = StorageSnapshot::default();
        snapshot
            .session
            .as_mut()
            .unwrap()
            .insert(RETURN_TRIP_KEY.to_string(), "yes".to_string());
        let mut storage = SnapshotStorage::new(snapshot);

        assert!(!take(&mut storage));
        assert!(storage.journal().is_empty());
    }

    #[test]
    fn test_unavailable_session_never_returns() {
        let mut storage = SnapshotStorage::new(StorageSnapshot::unavailable());
        arm(&mut storage);
        assert!(!take(&mut storage));
    }

    #[test]
    fn test_plan_plain_load_does_nothing() {
        let actions = plan_load(&config(RedirectBehavior::Front), false, || {
            panic!("cooldown must not be read")
        });
        assert!(actions.is_empty());
    }

    #[test]
    fn test_plan_returning_visitor_resumes() {
        let actions = plan_load(&config(RedirectBehavior::Front), true, || false);
        assert_eq!(actions, vec![LoadAction::ResumePlayback]);
    }

    #[test]
    fn test_plan_redirect_first_fresh_visitor_leaves() {
        let actions = plan_load(&config(RedirectBehavior::RedirectFirst), false, || false);
        assert_eq!(
            actions,
            vec![LoadAction::RedirectAway {
                url: "https://ads.example".to_string()
            }]
        );
    }

    #[test]
    fn test_plan_redirect_first_in_cooldown_resumes_once() {
        let actions = plan_load(&config(RedirectBehavior::RedirectFirst), false, || true);
        assert_eq!(actions, vec![LoadAction::ResumePlayback]);

        let actions = plan_load(&config(RedirectBehavior::RedirectFirst), true, || true);
        assert_eq!(actions, vec![LoadAction::ResumePlayback]);
    }

    #[test]
    fn test_plan_redirect_first_disabled_is_ignored() {
        let mut disabled = config(RedirectBehavior::RedirectFirst);
        disabled.enabled = false;

        assert!(plan_load(&disabled, false, || false).is_empty());
    }
}
