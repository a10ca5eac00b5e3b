//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Token bucket parameters for one group of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Seconds needed to replenish one request.
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimit {
    /// Anonymous read endpoints: one request replenished every 2 seconds, burst of 100.
    pub const PUBLIC: Self = Self {
        per_second: 2,
        burst_size: 100,
    };

    /// Authenticated endpoints: one request replenished every second, burst of 10.
    pub const SECURE: Self = Self {
        per_second: 1,
        burst_size: 10,
    };
}

/// Builds a governor layer keyed by `key_extractor`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer<K>(
    key_extractor: K,
    limit: RateLimit,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(limit.per_second)
            .burst_size(limit.burst_size)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Applies `limit` to every route of `router`, keyed per client IP.
///
/// When `behind_proxy` is `true` the client IP is read from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded`, falling back to the peer address. Otherwise the
/// socket peer address is used. Either way the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Example
///
/// ```rust,ignore
/// let cars = rate_limit::apply(api::routes::public_routes(), RateLimit::PUBLIC, false);
/// ```
pub fn apply(router: Router<AppState>, limit: RateLimit, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(layer(SmartIpKeyExtractor, limit))
    } else {
        router.layer(layer(PeerIpKeyExtractor, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_limit_has_smaller_burst() {
        assert!(RateLimit::SECURE.burst_size < RateLimit::PUBLIC.burst_size);
    }

    #[test]
    fn test_layer_builds_for_both_extractors() {
        let _ = layer(PeerIpKeyExtractor, RateLimit::PUBLIC);
        let _ = layer(SmartIpKeyExtractor, RateLimit::SECURE);
    }
}
