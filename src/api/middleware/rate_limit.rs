//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Limiter keyed by the socket peer address.
pub type PeerLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Limiter keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`, falling
/// back to the peer address.
pub type ProxyLimitLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Token bucket parameters: a client may spend `burst_size` requests at
/// once, and one more becomes available every `replenish_secs` seconds.
#[derive(Debug, Clone, Copy)]
struct Quota {
    replenish_secs: u64,
    burst_size: u32,
}

impl Quota {
    fn replenish_interval(self) -> Duration {
        Duration::from_secs(self.replenish_secs)
    }
}

/// General API endpoints: burst of 100, then one request every 2 seconds.
const STANDARD: Quota = Quota {
    replenish_secs: 2,
    burst_size: 100,
};

/// Login and registration: burst of 10, then one request per second.
const STRICT: Quota = Quota {
    replenish_secs: 1,
    burst_size: 10,
};

fn peer_layer(quota: Quota) -> PeerLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .period(quota.replenish_interval())
            .burst_size(quota.burst_size)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

fn proxy_layer(quota: Quota) -> ProxyLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .period(quota.replenish_interval())
            .burst_size(quota.burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

fn apply(router: Router<AppState>, behind_proxy: bool, quota: Quota) -> Router<AppState> {
    if behind_proxy {
        router.layer(proxy_layer(quota))
    } else {
        router.layer(peer_layer(quota))
    }
}

/// Applies the standard per-IP rate limit to every route in `router`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// With `behind_proxy` the client IP comes from forwarding headers;
/// otherwise from the socket peer address. The peer address requires the
/// server to run with `into_make_service_with_connect_info::<SocketAddr>`.
///
/// # Example
///
/// ```rust,ignore
/// let public = rate_limit::limit(api::routes::public_routes(), false);
/// ```
pub fn limit(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    apply(router, behind_proxy, STANDARD)
}

/// Applies the stricter rate limit used for credential endpoints, slowing
/// down password guessing.
pub fn limit_strict(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    apply(router, behind_proxy, STRICT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotas_replenish_one_request_per_interval() {
        assert_eq!(STANDARD.replenish_interval(), Duration::from_secs(2));
        assert_eq!(STANDARD.burst_size, 100);

        assert_eq!(STRICT.replenish_interval(), Duration::from_secs(1));
        assert_eq!(STRICT.burst_size, 10);
    }

    #[test]
    fn test_strict_quota_allows_burst_then_throttles() {
        let config = GovernorConfigBuilder::default()
            .period(STRICT.replenish_interval())
            .burst_size(STRICT.burst_size)
            .finish()
            .unwrap();
        let client = std::net::IpAddr::from([203, 0, 113, 7]);
        let other = std::net::IpAddr::from([203, 0, 113, 8]);

        for _ in 0..STRICT.burst_size {
            assert!(config.limiter().check_key(&client).is_ok());
        }
        assert!(config.limiter().check_key(&client).is_err());
        assert!(config.limiter().check_key(&other).is_ok());
    }
}
