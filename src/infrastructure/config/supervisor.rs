//! Connectivity supervisor cadence and retry budget.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::RetryState;

/// Connectivity supervisor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SupervisorConfig {
    /// Probe cadence while healthy (seconds).
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Backoff ceiling (seconds).
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,
    /// Multiplier applied to the delay after each failed probe.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    /// Consecutive failed probes before the session is ended.
    #[serde(default = "default_max_conn_retry")]
    pub max_conn_retry: u32,
    /// Timeout for a single probe (milliseconds).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

const fn default_refresh_interval_secs() -> u64 {
    15
}

const fn default_max_delay_secs() -> u64 {
    120 // 2 minutes
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

const fn default_max_conn_retry() -> u32 {
    5
}

const fn default_probe_timeout_ms() -> u64 {
    5000
}

impl SupervisorConfig {
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Fresh retry state for this configuration.
    #[must_use]
    pub fn retry_state(&self) -> RetryState {
        RetryState::new(
            self.refresh_interval(),
            Duration::from_secs(self.max_delay_secs),
            self.backoff_multiplier,
            self.max_conn_retry,
        )
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            max_delay_secs: default_max_delay_secs(),
            backoff_multiplier: default_backoff_multiplier(),
            max_conn_retry: default_max_conn_retry(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}
