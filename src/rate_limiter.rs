use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

/// Per-client admission control with deferred decay.
///
/// Each admitted request increments the client's counter and schedules an
/// independent decrement `decay` later, so the counter tracks admissions in a
/// sliding window rather than a fixed-interval bucket. Counters for different
/// clients are fully independent.
#[derive(Clone)]
pub struct RateLimiter {
    enabled: bool,
    cap: u32,
    decay: Duration,
    counts: Arc<Mutex<HashMap<String, u32>>>,
}

impl RateLimiter {
    pub fn new(enabled: bool, cap: u32, decay: Duration) -> Self {
        Self {
            enabled,
            cap,
            decay,
            counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a request from `client` may proceed. Read-only: the counter
    /// moves only when the request survives routing and validation and gets
    /// recorded.
    pub fn admit(&self, client: &str) -> bool {
        if !self.enabled {
            return true;
        }
        self.lock().get(client).copied().unwrap_or(0) < self.cap
    }

    /// Record one admission for `client` and schedule its decay.
    pub fn record(&self, client: &str) {
        if !self.enabled {
            return;
        }

        let count = {
            let mut counts = self.lock();
            let count = counts.entry(client.to_string()).or_insert(0);
            *count += 1;
            *count
        };
        debug!(client = %client, count, "admission recorded");

        let counts = Arc::clone(&self.counts);
        let client = client.to_string();
        let decay = self.decay;
        tokio::spawn(async move {
            tokio::time::sleep(decay).await;
            let mut counts = counts.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(count) = counts.get_mut(&client) {
                *count = count.saturating_sub(1);
                // Idle clients cost nothing; an absent entry reads as zero.
                if *count == 0 {
                    counts.remove(&client);
                }
            }
        });
    }

    /// Current counter for `client`.
    pub fn count(&self, client: &str) -> u32 {
        self.lock().get(client).copied().unwrap_or(0)
    }

    /// Number of clients with a live counter.
    pub fn tracked_clients(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, u32>> {
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT: &str = "203.0.113.7";

    fn limiter(cap: u32, decay_secs: u64) -> RateLimiter {
        RateLimiter::new(true, cap, Duration::from_secs(decay_secs))
    }

    #[tokio::test]
    async fn test_disabled_limiter_admits_everything() {
        let limiter = RateLimiter::new(false, 0, Duration::from_secs(1));
        for _ in 0..100 {
            assert!(limiter.admit(CLIENT));
            limiter.record(CLIENT);
        }
        assert_eq!(limiter.count(CLIENT), 0);
        assert_eq!(limiter.tracked_clients(), 0);
    }

    #[tokio::test]
    async fn test_admit_rejects_at_cap() {
        let limiter = limiter(2, 60);
        assert!(limiter.admit(CLIENT));
        limiter.record(CLIENT);
        assert!(limiter.admit(CLIENT));
        limiter.record(CLIENT);
        // Third request within the window is rejected, and rejection leaves
        // the counter untouched.
        assert!(!limiter.admit(CLIENT));
        assert!(!limiter.admit(CLIENT));
        assert_eq!(limiter.count(CLIENT), 2);
    }

    #[tokio::test]
    async fn test_clients_are_independent() {
        let limiter = limiter(1, 60);
        limiter.record(CLIENT);
        assert!(!limiter.admit(CLIENT));
        assert!(limiter.admit("198.51.100.1"));
        assert_eq!(limiter.count("198.51.100.1"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_decays_to_zero() {
        let limiter = limiter(10, 1);
        for _ in 0..3 {
            limiter.record(CLIENT);
        }
        assert_eq!(limiter.count(CLIENT), 3);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(limiter.count(CLIENT), 0);
        assert_eq!(limiter.tracked_clients(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_readmission_after_decay() {
        let limiter = limiter(1, 1);
        assert!(limiter.admit(CLIENT));
        limiter.record(CLIENT);
        assert!(!limiter.admit(CLIENT));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(limiter.admit(CLIENT));
    }

    #[tokio::test(start_paused = true)]
    async fn test_decay_is_per_admission() {
        let limiter = limiter(10, 2);
        limiter.record(CLIENT);
        tokio::time::sleep(Duration::from_secs(1)).await;
        limiter.record(CLIENT);
        assert_eq!(limiter.count(CLIENT), 2);

        // First admission's decay fires at t=2s, second's at t=3s.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(limiter.count(CLIENT), 1);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(limiter.count(CLIENT), 0);
    }
}
