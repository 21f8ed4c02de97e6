//! Anti-repeat cooldown for the direct link.
//!
//! Two stores back the cooldown: a cookie whose expiry equals the window (capped
//! at [`MAX_COOKIE_AGE_SECS`]), and a durable timestamp. The timestamp is
//! authoritative. It lets the tracker expire the cooldown itself even when the
//! browser keeps the cookie longer than configured (clock changes, a window
//! shortened after the cookie was set).

use chrono::TimeDelta;
use tracing::{debug, warn};

use super::clock::Clock;
use super::storage::{MARKER_COOKIE, Scope, TIMESTAMP_KEY, VisitorStorage};

const MARKER_VALUE: &str = "true";

/// Browsers cap cookie lifetime at 400 days; longer windows rely on the
/// durable timestamp.
pub const MAX_COOKIE_AGE_SECS: u64 = 400 * 24 * 60 * 60;

/// Reads and refreshes the "direct link already shown" state of one visitor.
pub struct CooldownTracker<'a, S: VisitorStorage + ?Sized> {
    storage: &'a mut S,
    clock: &'a dyn Clock,
    window_secs: u64,
}

impl<'a, S: VisitorStorage + ?Sized> CooldownTracker<'a, S> {
    pub fn new(storage: &'a mut S, clock: &'a dyn Clock, window_secs: u64) -> Self {
        Self {
            storage,
            clock,
            window_secs,
        }
    }

    /// Returns true while the visitor is inside the cooldown window.
    ///
    /// An expired durable timestamp clears both stores. Without a usable
    /// timestamp the cookie marker decides. Unreadable storage counts as a
    /// fresh visitor.
    pub fn is_active(&mut self) -> bool {
        match self.storage.get(Scope::Durable, TIMESTAMP_KEY) {
            Ok(Some(raw)) => match self.elapsed_secs(&raw) {
                Some(elapsed_secs) => return self.check_elapsed(elapsed_secs),
                None => {
                    warn!(value = %raw, "Discarding unusable cooldown timestamp");
                    if let Err(e) = self.storage.remove(Scope::Durable, TIMESTAMP_KEY) {
                        debug!("Failed to drop cooldown timestamp: {}", e);
                    }
                }
            },
            Ok(None) => {}
            Err(e) => debug!("Cooldown timestamp unreadable: {}", e),
        }

        match self.storage.get(Scope::Cookie, MARKER_COOKIE) {
            Ok(value) => value.as_deref() == Some(MARKER_VALUE),
            Err(e) => {
                debug!("Cooldown cookie unreadable: {}", e);
                false
            }
        }
    }

    /// Starts a new cooldown window from now.
    ///
    /// Both writes are attempted independently; a store that refuses the write
    /// is logged and skipped.
    pub fn mark_active(&mut self) {
        let now = self.clock.now();
        let cookie_secs = self.window_secs.min(MAX_COOKIE_AGE_SECS);
        let expires = i64::try_from(cookie_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|window| now.checked_add_signed(window));

        if let Err(e) = self
            .storage
            .set(Scope::Cookie, MARKER_COOKIE, MARKER_VALUE, expires)
        {
            warn!("Failed to set cooldown cookie: {}", e);
        }

        let stamp = now.timestamp_millis().to_string();
        if let Err(e) = self.storage.set(Scope::Durable, TIMESTAMP_KEY, &stamp, None) {
            warn!("Failed to record cooldown timestamp: {}", e);
        }

        debug!(window_secs = self.window_secs, "Cooldown started");
    }

    /// Whole seconds since `raw` (epoch ms), rounding half up. `None` when the
    /// value is not a number or too far from now to measure.
    fn elapsed_secs(&self, raw: &str) -> Option<i64> {
        let marked_at = raw.trim().parse::<i64>().ok()?;
        let elapsed_ms = self.clock.now().timestamp_millis().checked_sub(marked_at)?;
        Some(elapsed_ms.checked_add(500)?.div_euclid(1000))
    }

    fn check_elapsed(&mut self, elapsed_secs: i64) -> bool {
        if elapsed_secs >= i64::try_from(self.window_secs).unwrap_or(i64::MAX) {
            debug!(elapsed_secs, "Cooldown expired, clearing stored state");
            self.clear();
            false
        } else {
            true
        }
    }

    fn clear(&mut self) {
        if let Err(e) = self.storage.remove(Scope::Durable, TIMESTAMP_KEY) {
            debug!("Failed to clear cooldown timestamp: {}", e);
        }
        if let Err(e) = self.storage.remove(Scope::Cookie, MARKER_COOKIE) {
            debug!("Failed to clear cooldown cookie: {}", e);
        }
    }
}
