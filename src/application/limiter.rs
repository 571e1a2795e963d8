//! Process-wide spacing of outbound fetches.
//!
//! Any two permits are at least `min_interval` apart regardless of which task
//! asked for them. The state lock is held across the wait, so waiters are
//! served one at a time in arrival order (tokio's mutex is fair).

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

/// Enforces a minimum interval between outbound requests.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_permit: Mutex<Option<Instant>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_permit: Mutex::new(None),
        }
    }

    /// Wait until a request may be issued. Returns how long the caller waited.
    ///
    /// Cancelling the returned future while it sleeps does not consume a
    /// permit: the timestamp is only recorded after the wait completes.
    pub async fn acquire(&self) -> Duration {
        let started = Instant::now();
        let mut last = self.last_permit.lock().await;

        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            if ready_at > Instant::now() {
                sleep_until(ready_at).await;
            }
        }

        let now = Instant::now();
        *last = Some(now);
        let waited = now.duration_since(started);
        trace!(waited_ms = waited.as_millis() as u64, "Rate limiter permit granted");
        waited
    }
}
