//! The redirect decision engine behind the watch page.
//!
//! A [`PlayerSession`] receives the visitor events of one page view (load, play
//! click, playback ended, deferred timer) and answers with [`Effect`]s. All
//! per-visitor state lives in the visitor's own browser stores, reached through
//! [`VisitorStorage`]:
//!
//! - the cooldown ([`CooldownTracker`]) keeps the direct link from being shown
//!   twice within `cookieDuration`;
//! - the return-trip flag ([`resume`]) resumes playback after a `front` redirect.
//!
//! Strategy selection ([`strategy::select`]) and next-post routing
//! ([`routing::next_post`]) are pure functions.

pub mod clock;
pub mod cooldown;
pub mod device;
pub mod effect;
pub mod playback;
pub mod resume;
pub mod routing;
pub mod session;
pub mod snapshot;
pub mod storage;
pub mod strategy;

pub use clock::{Clock, ManualClock, SystemClock};
pub use cooldown::CooldownTracker;
pub use device::{DeviceClass, DeviceClassifier, DeviceProfile, FixedClassifier, HeuristicClassifier};
pub use effect::{Deferred, Effect};
pub use playback::{PlaybackState, PlaybackTrigger};
pub use session::{PageContext, PlayerSession, Timing, VisitorEvent};
pub use snapshot::{SnapshotStorage, StorageOp, StorageSnapshot};
pub use storage::{MemoryStorage, Scope, StorageError, VisitorStorage};
pub use strategy::Decision;
