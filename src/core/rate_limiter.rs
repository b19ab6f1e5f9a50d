use crate::domain::ports::Clock;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(3000);

/// Enforces a minimum spacing between remote dispatches.
///
/// Each caller reserves the slot `max(now, last + min_interval)` under the
/// lock and then sleeps until it, so overlapping callers never share a slot.
pub struct RateLimiter<C: Clock> {
    clock: C,
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl<C: Clock> RateLimiter<C> {
    pub fn new(clock: C, min_interval: Duration) -> Self {
        Self {
            clock,
            min_interval,
            last_dispatch: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn last_dispatch(&self) -> Option<Instant> {
        *self
            .last_dispatch
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reserve(&self, now: Instant) -> Instant {
        let mut last = self
            .last_dispatch
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let slot = match *last {
            Some(previous) => (previous + self.min_interval).max(now),
            None => now,
        };
        *last = Some(slot);
        slot
    }

    /// Waits for the next dispatch slot and returns how long the caller was
    /// suspended.
    pub async fn acquire(&self) -> Duration {
        let now = self.clock.now();
        let slot = self.reserve(now);
        let wait = slot.saturating_duration_since(now);

        if !wait.is_zero() {
            tracing::debug!(wait_ms = wait.as_millis() as u64, "Rate limiting remote request");
            self.clock.sleep(wait).await;
        }

        wait
    }
}
