//! Fan-out parallelism and per-task timeout policy.

use std::time::Duration;

use serde::Deserialize;

/// Fan-out configuration.
///
/// Timeouts are per task, not per batch. Listing and command execution have
/// none unless configured.
#[derive(Debug, Clone, Deserialize)]
pub struct FanoutConfig {
    /// Concurrent tasks for listing and version probing.
    #[serde(default = "default_max_parallel")]
    pub max_parallel: usize,
    /// Default concurrent `kubectl` processes for command fan-out.
    #[serde(default = "default_max_parallel")]
    pub command_max_parallel: usize,
    /// Per-context version probe timeout (milliseconds).
    #[serde(default = "default_version_timeout_ms")]
    pub version_timeout_ms: u64,
    /// Per-context list timeout (milliseconds).
    #[serde(default)]
    pub list_timeout_ms: Option<u64>,
    /// Per-context command timeout (milliseconds).
    #[serde(default)]
    pub command_timeout_ms: Option<u64>,
}

pub const DEFAULT_MAX_PARALLEL: usize = 10;

const fn default_max_parallel() -> usize {
    DEFAULT_MAX_PARALLEL
}

const fn default_version_timeout_ms() -> u64 {
    5000
}

impl FanoutConfig {
    #[must_use]
    pub fn version_timeout(&self) -> Duration {
        Duration::from_millis(self.version_timeout_ms)
    }

    #[must_use]
    pub fn list_timeout(&self) -> Option<Duration> {
        self.list_timeout_ms.map(Duration::from_millis)
    }

    #[must_use]
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            max_parallel: default_max_parallel(),
            command_max_parallel: default_max_parallel(),
            version_timeout_ms: default_version_timeout_ms(),
            list_timeout_ms: None,
            command_timeout_ms: None,
        }
    }
}
