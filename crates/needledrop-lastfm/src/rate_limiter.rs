// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tokio::time::{sleep_until, Duration, Instant};

/// Spacing guard for Last.fm API calls.
///
/// Last.fm asks clients to stay well under 5 requests per second. Callers
/// funnel through a single permit and are held until the next send slot,
/// `min_interval` after the previous request went out.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    gate: Arc<Semaphore>,
    min_interval: Duration,
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a rate limiter that spaces requests by `min_interval`.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            gate: Arc::new(Semaphore::new(1)),
            min_interval,
            next_slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Rate limiter with Last.fm-friendly defaults (4 requests per second).
    pub fn lastfm_default() -> Self {
        Self::new(Duration::from_millis(250))
    }

    /// Wait until a request can be made according to the rate limit.
    pub async fn acquire(&self) {
        let _permit = self.gate.acquire().await.expect("semaphore closed");

        let mut next_slot = self.next_slot.lock().await;
        if let Some(slot) = *next_slot {
            if slot > Instant::now() {
                tracing::trace!(target: "lastfm", "rate limiting until {:?}", slot);
                sleep_until(slot).await;
            }
        }
        *next_slot = Some(Instant::now() + self.min_interval);
    }
}
