//! Minimum spacing between backend calls.
//!
//! One limiter is owned by the inference router and shared by both backends,
//! so every outbound model call in the process is paced by the same clock.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug)]
pub struct RateLimiter {
    min_delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_call: Mutex::new(None),
        }
    }

    /// Wait until at least `min_delay` has passed since the last call, then
    /// claim the slot.
    ///
    /// The lock is held across the sleep so concurrent callers queue up
    /// instead of all waking at the same instant.
    pub async fn acquire(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_delay {
                let wait = self.min_delay - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "Rate limiting backend call");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Record that a call just finished, so the next one is spaced from its end.
    pub async fn touch(&self) {
        *self.last_call.lock().await = Some(Instant::now());
    }
}
