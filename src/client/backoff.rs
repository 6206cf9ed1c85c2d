//! Retry delay schedule for the bounded retry loop.

use std::time::Duration;

/// Doubling delay schedule with a hard cap and a small spread so concurrent
/// invocations retrying at once do not stay synchronized.
///
/// Sized for this crate's two-retry budget; `cap` also bounds how long a
/// server-suggested `Retry-After` is honored.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    cap: Duration,
    spread: f64,
}

impl Backoff {
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self {
            base,
            cap,
            spread: 0.1,
        }
    }

    /// Fraction of the delay used as a randomization window.
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread.clamp(0.0, 1.0);
        self
    }

    /// Longest delay this schedule will ever produce.
    pub fn cap(&self) -> Duration {
        self.cap
    }

    /// Delay before retry `attempt` (1-based): the base doubled once per
    /// prior attempt, never above the cap.
    pub fn delay(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(1).min(16);
        let exact = self.base.saturating_mul(1u32 << doublings).min(self.cap);
        if self.spread == 0.0 {
            return exact;
        }
        // Uniform in [exact - window, exact + window], still capped.
        let window = exact.mul_f64(self.spread);
        (exact - window + window.mul_f64(rand::random::<f64>() * 2.0)).min(self.cap)
    }
}

impl Default for Backoff {
    /// Short schedule sized for a two-retry budget against a 30s timeout.
    fn default() -> Self {
        Self {
            base: Duration::from_millis(250),
            cap: Duration::from_secs(2),
            spread: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_double_without_spread() {
        let backoff =
            Backoff::new(Duration::from_millis(250), Duration::from_secs(2)).with_spread(0.0);

        assert_eq!(backoff.delay(1), Duration::from_millis(250));
        assert_eq!(backoff.delay(2), Duration::from_millis(500));
        assert_eq!(backoff.delay(3), Duration::from_millis(1000));
    }

    #[test]
    fn test_delay_never_exceeds_cap() {
        let backoff = Backoff::new(Duration::from_millis(250), Duration::from_secs(1));
        for attempt in 1..64 {
            assert!(backoff.delay(attempt) <= Duration::from_secs(1));
        }
    }

    #[test]
    fn test_spread_stays_in_band() {
        let backoff =
            Backoff::new(Duration::from_millis(1000), Duration::from_secs(4)).with_spread(0.5);
        for _ in 0..100 {
            let d = backoff.delay(1);
            assert!(d >= Duration::from_millis(500) && d <= Duration::from_millis(1500));
        }
    }
}
