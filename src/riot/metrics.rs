use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::{Instrument, info_span};

/// Counters about the traffic sent to the Riot API, logged once a minute.
#[derive(Debug)]
pub struct RequestMetrics {
    start: Instant,
    attempts: AtomicU64,
    retries: AtomicU64,
    throttled: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub attempts: u64,
    pub retries: u64,
    pub throttled: u64,
}

impl RequestMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            attempts: AtomicU64::new(0),
            retries: AtomicU64::new(0),
            throttled: AtomicU64::new(0),
        })
    }

    /// One HTTP attempt went out.
    pub fn inc(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    /// An attempt is about to be repeated after a transient failure.
    pub fn inc_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    /// A request had to wait on a local quota or on a 429.
    pub fn inc_throttled(&self) {
        self.throttled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            attempts: self.attempts.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            throttled: self.throttled.load(Ordering::Relaxed),
        }
    }

    pub async fn log_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            let span = info_span!("📊 ");
            async {
                interval.tick().await;
                let snapshot = self.snapshot();
                let elapsed_min = self.start.elapsed().as_secs_f64() / 60.0;
                let avg = if elapsed_min > 0.0 {
                    snapshot.attempts as f64 / elapsed_min
                } else {
                    0.0
                };
                tracing::info!(
                    retries = snapshot.retries,
                    throttled = snapshot.throttled,
                    "{} requests executed (avg {:.2} req/min)",
                    snapshot.attempts,
                    avg
                );
            }
            .instrument(span)
            .await
        }
    }
}
