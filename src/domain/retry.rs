//! Connectivity retry bookkeeping.

use std::time::Duration;

/// Cluster connectivity as seen by the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityState {
    Healthy,
    /// Probes are failing but the retry budget is not spent.
    Degraded { failures: u32 },
    /// Terminal: the retry budget is spent.
    FatallyDisconnected { failures: u32 },
}

impl ConnectivityState {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::FatallyDisconnected { .. })
    }
}

/// Consecutive-failure counter with capped exponential backoff.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryState {
    consecutive_failures: u32,
    current_delay: Duration,
    base_delay: Duration,
    max_delay: Duration,
    max_failures: u32,
    multiplier: f64,
}

impl RetryState {
    pub fn new(base_delay: Duration, max_delay: Duration, multiplier: f64, max_failures: u32) -> Self {
        Self {
            consecutive_failures: 0,
            current_delay: base_delay,
            base_delay,
            max_delay: max_delay.max(base_delay),
            max_failures,
            multiplier: multiplier.max(1.0),
        }
    }

    /// Back to initial values after a successful probe.
    pub fn reset(&mut self) {
        self.consecutive_failures = 0;
        self.current_delay = self.base_delay;
    }

    /// Count a failed probe and return the delay before the next one.
    pub fn record_failure(&mut self) -> Duration {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        let next = self.current_delay.as_secs_f64() * self.multiplier;
        self.current_delay = Duration::from_secs_f64(next.min(self.max_delay.as_secs_f64()));
        self.current_delay
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.consecutive_failures >= self.max_failures
    }

    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    #[must_use]
    pub fn current_delay(&self) -> Duration {
        self.current_delay
    }

    #[must_use]
    pub fn max_failures(&self) -> u32 {
        self.max_failures
    }

    #[must_use]
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> RetryState {
        RetryState::new(Duration::from_millis(10), Duration::from_millis(100), 2.0, 3)
    }

    #[test]
    fn exponential_backoff_is_capped() {
        let mut retry = state();
        assert_eq!(retry.record_failure(), Duration::from_millis(20));
        assert_eq!(retry.record_failure(), Duration::from_millis(40));
        assert_eq!(retry.record_failure(), Duration::from_millis(80));
        assert_eq!(retry.record_failure(), Duration::from_millis(100));
        assert_eq!(retry.record_failure(), Duration::from_millis(100));
    }

    #[test]
    fn exhaustion_at_max_failures() {
        let mut retry = state();
        retry.record_failure();
        retry.record_failure();
        assert!(!retry.is_exhausted());
        retry.record_failure();
        assert!(retry.is_exhausted());
        assert_eq!(retry.consecutive_failures(), 3);
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut retry = state();
        retry.record_failure();
        retry.record_failure();
        retry.reset();
        assert_eq!(retry.consecutive_failures(), 0);
        assert_eq!(retry.current_delay(), Duration::from_millis(10));
        assert_eq!(retry, state());
    }

    #[test]
    fn max_delay_never_below_base() {
        let retry = RetryState::new(Duration::from_secs(15), Duration::from_secs(1), 2.0, 5);
        assert_eq!(retry.max_delay(), Duration::from_secs(15));
    }
}
