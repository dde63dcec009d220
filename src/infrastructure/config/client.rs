//! Per-context API client tuning.

use std::time::Duration;

use serde::Deserialize;

/// Rate limits and request timeout for per-context clients.
///
/// Defaults sit well above a single-cluster client's so that fanning out to
/// many contexts at once does not starve on throttling.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Sustained requests per second.
    #[serde(default = "default_qps")]
    pub qps: u32,
    /// Burst capacity.
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Whole-request timeout (milliseconds).
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

const fn default_qps() -> u32 {
    50
}

const fn default_burst() -> u32 {
    100
}

impl ClientConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            qps: default_qps(),
            burst: default_burst(),
            request_timeout_ms: None,
        }
    }
}
