//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; a missing file yields defaults.
//!
//! # Example
//!
//! ```no_run
//! use kubefan::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::client::ClientConfig;
use super::fanout::FanoutConfig;
use super::logging::LoggingConfig;
use super::paths;
use super::supervisor::SupervisorConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Parallelism and per-task timeouts for fan-out batches.
    #[serde(default)]
    pub fanout: FanoutConfig,

    /// Rate limits for per-context API clients.
    #[serde(default)]
    pub client: ClientConfig,

    /// Connectivity supervisor cadence and retry budget.
    #[serde(default)]
    pub supervisor: SupervisorConfig,

    /// Kubeconfig file. Defaults to `$KUBECONFIG`, then `~/.kube/config`.
    #[serde(default)]
    pub kubeconfig: Option<PathBuf>,

    /// `kubectl` binary used for command fan-out.
    #[serde(default = "default_kubectl")]
    pub kubectl: String,

    /// Selected-contexts file. Defaults to `~/.kubefan/selected_contexts`.
    #[serde(default)]
    pub selection_file: Option<PathBuf>,
}

fn default_kubectl() -> String {
    "kubectl".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            fanout: FanoutConfig::default(),
            client: ClientConfig::default(),
            supervisor: SupervisorConfig::default(),
            kubeconfig: None,
            kubectl: default_kubectl(),
            selection_file: None,
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` when it exists, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        let invalid = |field: &'static str, reason: &str| -> crate::error::Error {
            ConfigError::InvalidValue {
                field,
                reason: reason.to_string(),
            }
            .into()
        };

        if self.fanout.max_parallel == 0 {
            return Err(invalid("max_parallel", "must be greater than 0"));
        }
        if self.fanout.command_max_parallel == 0 {
            return Err(invalid("command_max_parallel", "must be greater than 0"));
        }
        if self.fanout.version_timeout_ms == 0 {
            return Err(invalid("version_timeout_ms", "must be greater than 0"));
        }
        if self.fanout.list_timeout_ms == Some(0) {
            return Err(invalid("list_timeout_ms", "must be greater than 0"));
        }
        if self.fanout.command_timeout_ms == Some(0) {
            return Err(invalid("command_timeout_ms", "must be greater than 0"));
        }

        if self.client.qps == 0 {
            return Err(invalid("qps", "must be greater than 0"));
        }
        if self.client.burst < self.client.qps {
            return Err(invalid("burst", "must be >= qps"));
        }

        let supervisor = &self.supervisor;
        if supervisor.refresh_interval_secs == 0 {
            return Err(invalid("refresh_interval_secs", "must be greater than 0"));
        }
        if supervisor.max_delay_secs < supervisor.refresh_interval_secs {
            return Err(invalid("max_delay_secs", "must be >= refresh_interval_secs"));
        }
        if supervisor.backoff_multiplier < 1.0 {
            return Err(invalid("backoff_multiplier", "must be >= 1.0"));
        }
        if supervisor.max_conn_retry == 0 {
            return Err(invalid("max_conn_retry", "must be greater than 0"));
        }
        if supervisor.probe_timeout_ms == 0 {
            return Err(invalid("probe_timeout_ms", "must be greater than 0"));
        }

        if self.kubectl.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "kubectl" }.into());
        }
        Ok(())
    }

    /// Kubeconfig files to read, in merge order.
    #[must_use]
    pub fn kubeconfig_paths(&self) -> Vec<PathBuf> {
        match &self.kubeconfig {
            Some(path) => vec![path.clone()],
            None => paths::default_kubeconfigs(),
        }
    }

    #[must_use]
    pub fn selection_path(&self) -> PathBuf {
        self.selection_file
            .clone()
            .unwrap_or_else(paths::default_selection_file)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
