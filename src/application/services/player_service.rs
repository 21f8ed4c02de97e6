//! Runs the player engine for one event reported by a watch page.

use rand::Rng;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::PostBundle;
use crate::player::{
    Clock, DeviceClassifier, DeviceProfile, Effect, PageContext, PlaybackState, PlayerSession,
    SnapshotStorage, StorageOp, StorageSnapshot, Timing, VisitorEvent,
};

/// One event as reported by the page, with the stores it could read.
#[derive(Debug, Clone)]
pub struct PlayerInput {
    pub event: VisitorEvent,
    pub playback: PlaybackState,
    pub page_url: String,
    pub device: DeviceProfile,
    pub storage: StorageSnapshot,
}

/// What the page must do after an event.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerOutcome {
    pub playback: PlaybackState,
    pub effects: Vec<Effect>,
    /// Writes to replay on the visitor's stores, in order.
    pub storage: Vec<StorageOp>,
}

/// Stateless bridge between HTTP and [`PlayerSession`].
///
/// Visitor state travels with each request as a [`StorageSnapshot`]; the
/// resulting writes travel back as [`StorageOp`]s.
pub struct PlayerService {
    classifier: Arc<dyn DeviceClassifier>,
    clock: Arc<dyn Clock>,
    timing: Timing,
}

impl PlayerService {
    pub fn new(classifier: Arc<dyn DeviceClassifier>, clock: Arc<dyn Clock>, timing: Timing) -> Self {
        Self {
            classifier,
            clock,
            timing,
        }
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Handles one event against the bundle of the viewed post.
    pub fn handle<R: Rng + ?Sized>(
        &self,
        bundle: &PostBundle,
        input: PlayerInput,
        rng: &mut R,
    ) -> PlayerOutcome {
        let page = PageContext {
            post_id: bundle.post.id,
            page_url: input.page_url,
            redirect: bundle.settings.redirect.clone(),
            other_posts: bundle.other_posts.clone(),
        };
        let device = self.classifier.classify(&input.device);

        let mut session = PlayerSession::new(
            page,
            SnapshotStorage::new(input.storage),
            self.clock.clone(),
            self.timing,
        )
        .with_playback(input.playback);

        let effects = session.handle(input.event, device, rng);
        let playback = session.playback();
        let storage = session.into_storage().into_journal();

        debug!(
            post_id = bundle.post.id,
            event = ?input.event,
            ?device,
            effects = effects.len(),
            writes = storage.len(),
            "Player event handled"
        );

        PlayerOutcome {
            playback,
            effects,
            storage,
        }
    }
}
