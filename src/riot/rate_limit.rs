//! Per-endpoint request quotas using a sliding-window log.
//!
//! Every (family, limit type) pair gets its own window holding the exact
//! timestamps of the requests issued within the trailing period. Windows are
//! created on first use and live as long as the limiter. The limiter is
//! advisory: it keeps us under Riot's method limits, it does not coordinate
//! with other processes sharing the same key.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, PoisonError},
    time::Duration,
};

use tokio::time::{Instant, sleep};
use tracing::debug;

use super::catalog::{CatalogError, Family, RateLimitRule, rate_limit_rule};

/// Timestamps of the requests issued within the trailing `window`.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    max_requests: u32,
    window: Duration,
    requests: VecDeque<Instant>,
}

impl SlidingWindow {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: VecDeque::new(),
        }
    }

    pub fn from_rule(rule: &RateLimitRule) -> Self {
        Self::new(rule.max_requests, rule.window())
    }

    fn prune(&mut self, now: Instant) {
        while let Some(&oldest) = self.requests.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                self.requests.pop_front();
            } else {
                break;
            }
        }
    }

    /// Time to wait before a new request fits in the window, zero when it fits now.
    pub fn admit_at(&mut self, now: Instant) -> Duration {
        self.prune(now);

        if (self.requests.len() as u64) < u64::from(self.max_requests) {
            return Duration::ZERO;
        }

        self.requests.front().map_or(Duration::ZERO, |&oldest| {
            self.window
                .saturating_sub(now.saturating_duration_since(oldest))
        })
    }

    pub fn record_at(&mut self, now: Instant) {
        self.requests.push_back(now);
    }

    /// Amount of retained timestamps, stale ones included until the next admit.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Time of the most recent request.
    pub fn newest(&self) -> Option<Instant> {
        self.requests.back().copied()
    }
}

type WindowKey = (Family, &'static str);

/// Owns every sliding window of a client.
#[derive(Debug, Default)]
pub struct EndpointLimiter {
    windows: Mutex<HashMap<WindowKey, SlidingWindow>>,
}

impl EndpointLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_window<R>(
        &self,
        family: Family,
        limit_type: &str,
        f: impl FnOnce(&mut SlidingWindow) -> R,
    ) -> Result<R, CatalogError> {
        let rule = rate_limit_rule(family, limit_type)?;

        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let window = windows
            .entry((rule.family, rule.limit_type))
            .or_insert_with(|| SlidingWindow::from_rule(rule));

        Ok(f(window))
    }

    /// Time to wait before issuing a request to `family`/`limit_type`. Does not record anything.
    pub fn admit(&self, family: Family, limit_type: &str) -> Result<Duration, CatalogError> {
        self.with_window(family, limit_type, |window| window.admit_at(Instant::now()))
    }

    /// Count a request issued now against `family`/`limit_type`.
    pub fn record(&self, family: Family, limit_type: &str) -> Result<(), CatalogError> {
        self.with_window(family, limit_type, |window| {
            window.record_at(Instant::now())
        })
    }

    /// Wait until the quota has room, then take a slot.
    ///
    /// The admit check and the record happen under the same lock so two
    /// concurrent callers can never both claim the last slot. The lock is
    /// released while sleeping. Returns the total time spent waiting.
    pub async fn acquire(&self, family: Family, limit_type: &str) -> Result<Duration, CatalogError> {
        let mut waited = Duration::ZERO;

        loop {
            let wait = self.with_window(family, limit_type, |window| {
                let now = Instant::now();
                let wait = window.admit_at(now);
                if wait.is_zero() {
                    window.record_at(now);
                }
                wait
            })?;

            if wait.is_zero() {
                return Ok(waited);
            }

            debug!(
                family = %family,
                limit_type,
                wait_ms = wait.as_millis() as u64,
                "⏳ rate limit reached, waiting"
            );
            sleep(wait).await;
            waited += wait;
        }
    }

    pub fn newest(&self, family: Family, limit_type: &str) -> Result<Option<Instant>, CatalogError> {
        self.with_window(family, limit_type, |window| window.newest())
    }

    /// Amount of requests currently retained for `family`/`limit_type`.
    pub fn tracked(&self, family: Family, limit_type: &str) -> Result<usize, CatalogError> {
        self.with_window(family, limit_type, |window| window.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::riot::catalog::DEFAULT_LIMIT;

    const W: Duration = Duration::from_secs(10);

    #[test]
    fn full_window_asks_to_wait_then_frees_up() {
        let mut window = SlidingWindow::new(3, W);
        let start = Instant::now();

        for _ in 0..3 {
            assert_eq!(window.admit_at(start), Duration::ZERO);
            window.record_at(start);
        }

        let wait = window.admit_at(start);
        assert!(wait > Duration::ZERO && wait <= W);

        assert_eq!(window.admit_at(start + wait), Duration::ZERO);
    }

    #[test]
    fn wait_is_measured_from_the_oldest_request() {
        let mut window = SlidingWindow::new(2, W);
        let start = Instant::now();

        window.record_at(start);
        window.record_at(start + Duration::from_secs(4));

        let wait = window.admit_at(start + Duration::from_secs(6));
        assert_eq!(wait, Duration::from_secs(4));
    }

    #[test]
    fn requests_leave_the_window_after_its_length() {
        let mut window = SlidingWindow::new(10, W);
        let epsilon = Duration::from_millis(1);
        let t = Instant::now();

        window.record_at(t);
        window.record_at(t + W - epsilon);

        window.admit_at(t + W - epsilon);
        assert_eq!(window.len(), 2);

        window.admit_at(t + W + epsilon);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn admit_alone_does_not_change_the_count() {
        let mut window = SlidingWindow::new(1, W);
        let t = Instant::now();
        window.record_at(t);

        let first = window.admit_at(t + Duration::from_secs(1));
        let second = window.admit_at(t + Duration::from_secs(1));

        assert_eq!(first, second);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn windows_are_created_per_family_and_limit_type() {
        let limiter = EndpointLimiter::new();

        limiter.record(Family::LeagueV4, "by-queue").unwrap();
        limiter.record(Family::LeagueV4, "by-queue").unwrap();
        limiter.record(Family::LeagueV4, "challenger").unwrap();

        assert_eq!(limiter.tracked(Family::LeagueV4, "by-queue").unwrap(), 2);
        assert_eq!(limiter.tracked(Family::LeagueV4, "challenger").unwrap(), 1);
        assert_eq!(limiter.tracked(Family::MatchV5, DEFAULT_LIMIT).unwrap(), 0);
    }

    #[test]
    fn unknown_limit_type_is_an_error() {
        let limiter = EndpointLimiter::new();

        assert!(limiter.admit(Family::MatchV5, "by-queue").is_err());
        assert!(limiter.record(Family::LeagueV4, DEFAULT_LIMIT).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn acquire_waits_for_the_oldest_slot() {
        let limiter = EndpointLimiter::new();
        // league-exp-v4 allows 50 requests per 10 seconds.
        for _ in 0..50 {
            let waited = limiter.acquire(Family::LeagueExpV4, DEFAULT_LIMIT).await.unwrap();
            assert_eq!(waited, Duration::ZERO);
        }

        let start = Instant::now();
        let waited = limiter.acquire(Family::LeagueExpV4, DEFAULT_LIMIT).await.unwrap();

        assert_eq!(waited, W);
        assert!(start.elapsed() >= W);
        assert_eq!(limiter.tracked(Family::LeagueExpV4, DEFAULT_LIMIT).unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_acquires_never_overfill_the_window() {
        let limiter = Arc::new(EndpointLimiter::new());
        // league-v4 challenger: 30 requests per 10 seconds.
        let handles: Vec<_> = (0..40)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move {
                    limiter
                        .acquire(Family::LeagueV4, "challenger")
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut immediate = 0;
        for handle in handles {
            if handle.await.unwrap().is_zero() {
                immediate += 1;
            }
        }

        assert_eq!(immediate, 30);
    }
}
