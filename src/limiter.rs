//! Process-wide outbound rate limiting.
//!
//! A continuously-refilled token bucket gates every request leaving for the
//! remote API. The bucket is the only state shared across concurrent tool
//! invocations; it is injected by handle so tests can run it under
//! `tokio::time::pause`.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// Token bucket limiting outbound requests per rolling one-second window.
///
/// `acquire()` suspends the caller until a token is available, then consumes
/// exactly one. Token accounting happens under a mutex that is never held
/// across an await, so concurrent invocations cannot double-spend.
pub struct RateLimiter {
    capacity: f64,
    refill_per_sec: f64,
    state: Mutex<BucketState>,
}

impl RateLimiter {
    /// Create a limiter allowing `requests_per_second` requests per rolling
    /// second, with burst capacity equal to one window's worth.
    pub fn new(requests_per_second: u32) -> Self {
        let rate = f64::from(requests_per_second.max(1));
        Self {
            capacity: rate,
            refill_per_sec: rate,
            state: Mutex::new(BucketState {
                tokens: rate,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Wait until issuing one more request stays within the ceiling, then
    /// consume a token.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
                let now = Instant::now();
                let elapsed = now.duration_since(state.last_refill).as_secs_f64();
                state.tokens = (state.tokens + elapsed * self.refill_per_sec).min(self.capacity);
                state.last_refill = now;

                if state.tokens >= 1.0 {
                    state.tokens -= 1.0;
                    return;
                }
                // Time until one full token has accrued. Contending callers
                // re-check after sleeping; no caller waits longer than one
                // refill interval past token availability.
                Duration::from_secs_f64((1.0 - state.tokens) / self.refill_per_sec)
            };
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_burst_up_to_capacity_is_immediate() {
        let limiter = RateLimiter::new(5);
        let start = Instant::now();
        for _ in 0..5 {
            limiter.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_acquires_pace_at_rate() {
        let limiter = RateLimiter::new(5);
        let start = Instant::now();
        // 5 burst tokens plus 6 paced at 200ms each.
        for _ in 0..11 {
            limiter.acquire().await;
        }
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1190), "elapsed {elapsed:?}");
        assert!(elapsed <= Duration::from_millis(1400), "elapsed {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_acquires_never_exceed_ceiling() {
        let limiter = Arc::new(RateLimiter::new(5));
        let completed = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..12 {
            let limiter = Arc::clone(&limiter);
            let completed = Arc::clone(&completed);
            handles.push(tokio::spawn(async move {
                limiter.acquire().await;
                completed.fetch_add(1, Ordering::SeqCst);
            }));
        }

        // Let the burst drain without advancing time: at most the bucket
        // capacity may complete inside the first window.
        for _ in 0..32 {
            tokio::task::yield_now().await;
        }
        assert_eq!(completed.load(Ordering::SeqCst), 5);

        tokio::time::advance(Duration::from_millis(999)).await;
        for _ in 0..32 {
            tokio::task::yield_now().await;
        }
        assert!(completed.load(Ordering::SeqCst) <= 10);

        tokio::time::advance(Duration::from_secs(2)).await;
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(completed.load(Ordering::SeqCst), 12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refill_caps_at_capacity() {
        let limiter = RateLimiter::new(2);
        // Idle well past one window; burst must still be bounded by capacity.
        tokio::time::advance(Duration::from_secs(60)).await;
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(490));
    }
}
