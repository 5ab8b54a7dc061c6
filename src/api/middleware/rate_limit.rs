//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

use crate::config::Config;

pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Per-IP limits for the `/api` routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst: u32,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            per_second: 2,
            burst: 100,
        }
    }
}

impl From<&Config> for RateLimit {
    fn from(config: &Config) -> Self {
        Self {
            per_second: config.rate_limit_per_second,
            burst: config.rate_limit_burst,
        }
    }
}

/// Creates a rate limiter keyed by the socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Returns
/// `None` when either limit is zero, which disables limiting.
///
/// The server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the peer address
/// is available.
///
/// # Example
///
/// ```rust,ignore
/// let api = protected_routes().layer(rate_limit::layer(RateLimit::default()).unwrap());
/// ```
pub fn layer(limit: RateLimit) -> Option<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(limit.per_second)
        .burst_size(limit.burst)
        .finish()?;

    Some(GovernorLayer::new(Arc::new(governor_conf)))
}
