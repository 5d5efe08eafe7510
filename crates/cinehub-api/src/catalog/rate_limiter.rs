//! Catalog API rate limiter.

use std::time::{Duration, Instant};

/// Default minimum interval between requests (~40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Minimum-interval rate limiter shared by all requests of one client.
///
/// Concurrent category fetches queue on the limiter's mutex and leave
/// it spaced by at least `min_interval`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct RateLimiter {
    /// Minimum interval between requests.
    min_interval: Duration,
    /// Time the last request was released.
    last_request: Option<Instant>,
}

impl RateLimiter {
    /// Creates a new rate limiter with the given minimum interval.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Creates a new rate limiter with the default interval (25ms).
    pub(crate) const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// How long a request issued at `now` has to wait.
    fn delay_at(&self, now: Instant) -> Duration {
        self.last_request.map_or(Duration::ZERO, |last| {
            self.min_interval
                .saturating_sub(now.saturating_duration_since(last))
        })
    }

    /// Waits until the next request is allowed and records it.
    pub async fn wait(&mut self) {
        let delay = self.delay_at(Instant::now());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.last_request = Some(Instant::now());
    }
}
