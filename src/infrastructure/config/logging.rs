//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    /// Initialize the tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` overrides the configured level. Calling this twice is a no-op.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let _ = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
    }

    /// Same as [`init`](Self::init) with the level raised by `-v` flags.
    pub fn init_with_verbosity(&self, verbose: u8, quiet: bool) {
        let level = match (quiet, verbose) {
            (true, _) => "error",
            (false, 0) => return self.init(),
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        Self {
            level: level.to_string(),
            format: self.format.clone(),
        }
        .init();
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}
