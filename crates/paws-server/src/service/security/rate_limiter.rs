//! In-process sliding-window rate limiter.
//!
//! Every check takes one async mutex, so concurrent requests are counted
//! exactly within a process. Each process keeps its own counters; behind a
//! load balancer the effective limit is multiplied by the number of
//! replicas.

use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::handler::{ErrorKind, Result};

const TRACING_TARGET: &str = "paws_server::service::rate_limiter";

/// Number of tracked keys above which stale entries are pruned.
const PRUNE_THRESHOLD: usize = 10_000;

/// Bucket a request is counted against.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum RateLimitKey {
    /// Client address of the connection.
    Ip(IpAddr),
    /// Requests whose client address is unknown share one bucket.
    Unknown,
}

impl From<Option<IpAddr>> for RateLimitKey {
    fn from(ip: Option<IpAddr>) -> Self {
        ip.map_or(Self::Unknown, Self::Ip)
    }
}

/// Sliding-window request counter keyed by client.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<RateLimitKey, VecDeque<Instant>>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    /// Allows `max_requests` per key within any `window`.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        tracing::info!(
            target: TRACING_TARGET,
            max_requests,
            window_secs = window.as_secs_f64(),
            "rate limiter initialized"
        );

        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    /// Records a request and rejects it with `429` once the key is over
    /// its budget. Rejected requests are not recorded.
    pub async fn check(&self, key: RateLimitKey) -> Result<()> {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;

        if windows.len() > PRUNE_THRESHOLD {
            let before = windows.len();
            windows.retain(|_, hits| {
                Self::evict(hits, now, self.window);
                !hits.is_empty()
            });
            tracing::debug!(
                target: TRACING_TARGET,
                pruned = before - windows.len(),
                "pruned idle rate limit windows"
            );
        }

        let hits = windows.entry(key).or_default();
        Self::evict(hits, now, self.window);

        if hits.len() >= self.max_requests {
            let retry_after = hits
                .front()
                .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(self.window);
            let retry_after_secs = retry_after.as_secs().max(1);

            tracing::warn!(
                target: TRACING_TARGET,
                key = ?key,
                retry_after_secs,
                "rate limit exceeded"
            );

            return Err(ErrorKind::TooManyRequests
                .with_message("Too many requests, please slow down")
                .with_context(format!("Retry after {retry_after_secs} seconds")));
        }

        hits.push_back(now);
        Ok(())
    }

    /// Drops hits that fell out of the window.
    fn evict(hits: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(oldest) = hits.front() {
            if now.duration_since(*oldest) < window {
                break;
            }
            hits.pop_front();
        }
    }

    /// Maximum number of requests per window.
    #[inline]
    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    /// Length of the sliding window.
    #[inline]
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_requests", &self.max_requests)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    fn ip(last: u8) -> RateLimitKey {
        RateLimitKey::Ip(IpAddr::V4(Ipv4Addr::new(10, 0, 0, last)))
    }

    #[tokio::test]
    async fn allows_up_to_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..3 {
            assert!(limiter.check(ip(1)).await.is_ok());
        }

        let error = limiter.check(ip(1)).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TooManyRequests);
        assert!(error.context().is_some_and(|c| c.starts_with("Retry after")));
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check(ip(1)).await.is_ok());
        assert!(limiter.check(ip(2)).await.is_ok());
        assert!(limiter.check(RateLimitKey::Unknown).await.is_ok());
        assert!(limiter.check(ip(1)).await.is_err());
    }

    #[tokio::test]
    async fn window_slides() {
        let limiter = RateLimiter::new(1, Duration::from_millis(50));
        assert!(limiter.check(ip(1)).await.is_ok());
        assert!(limiter.check(ip(1)).await.is_err());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(limiter.check(ip(1)).await.is_ok());
    }

    #[tokio::test]
    async fn concurrent_checks_are_counted_exactly() {
        let limiter = RateLimiter::new(5, Duration::from_secs(60));
        let checks = (0..20).map(|_| {
            let limiter = limiter.clone();
            tokio::spawn(async move { limiter.check(ip(9)).await.is_ok() })
        });

        let mut allowed = 0;
        for check in checks {
            if check.await.unwrap() {
                allowed += 1;
            }
        }
        assert_eq!(allowed, 5);
    }

    #[test]
    fn missing_address_maps_to_unknown() {
        assert_eq!(RateLimitKey::from(None), RateLimitKey::Unknown);
    }
}
