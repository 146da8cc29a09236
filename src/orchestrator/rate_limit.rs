use std::collections::VecDeque;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Sliding-window request limiter shared by every task calling one provider.
#[derive(Debug)]
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    calls: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Allows `per_minute` requests in any 60 second window (at least one).
    pub fn per_minute(per_minute: u32) -> Self {
        Self::with_window(per_minute as usize, Duration::from_secs(60))
    }

    pub fn with_window(limit: usize, window: Duration) -> Self {
        Self {
            limit: limit.max(1),
            window,
            calls: Mutex::new(VecDeque::new()),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Waits until a slot is free, then takes it.
    pub async fn acquire(&self) {
        while let Some(wait) = self.reserve(Instant::now()) {
            debug!(wait_ms = wait.as_millis() as u64, "rate limit reached, waiting");
            tokio::time::sleep(wait).await;
        }
    }

    /// Slots still free in the current window.
    pub fn remaining(&self) -> usize {
        let mut calls = self.calls.lock();
        Self::prune(&mut calls, Instant::now(), self.window);
        self.limit.saturating_sub(calls.len())
    }

    /// Records a call at `now` and returns `None`, or returns how long to wait.
    fn reserve(&self, now: Instant) -> Option<Duration> {
        let mut calls = self.calls.lock();
        Self::prune(&mut calls, now, self.window);

        if calls.len() < self.limit {
            calls.push_back(now);
            return None;
        }

        calls
            .front()
            .map(|oldest| (*oldest + self.window).saturating_duration_since(now))
            .filter(|wait| !wait.is_zero())
            .or(Some(Duration::from_millis(1)))
    }

    fn prune(calls: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(oldest) = calls.front() {
            if now.saturating_duration_since(*oldest) >= window {
                calls.pop_front();
            } else {
                break;
            }
        }
    }
}
