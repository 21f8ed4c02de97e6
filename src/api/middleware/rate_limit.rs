//! Per-client rate limiting using a token bucket.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

type Layer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// One token every 500ms, bursts of 60.
///
/// A page view sends a handful of requests (page, load event, play click,
/// ended), so the burst covers several tabs from one address.
fn build<K: KeyExtractor>(key_extractor: K) -> Layer<K> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(500)
            .burst_size(60)
            .key_extractor(key_extractor)
            .finish()
            .expect("rate limit period and burst are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Rate limiter keyed by the socket peer address.
///
/// Requires the router to be served with `ConnectInfo<SocketAddr>`.
pub fn layer() -> Layer<PeerIpKeyExtractor> {
    build(PeerIpKeyExtractor)
}

/// Rate limiter keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`, falling
/// back to the peer address.
///
/// Only enable behind a trusted reverse proxy: clients can forge these headers.
pub fn proxied_layer() -> Layer<SmartIpKeyExtractor> {
    build(SmartIpKeyExtractor)
}
