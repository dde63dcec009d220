use std::time::Duration;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The named context (or its cluster/user entries) could not be resolved.
    #[error("context {context:?}: {reason}")]
    ConfigResolution { context: String, reason: String },

    /// A client for the context could not be constructed.
    #[error("client for context {context:?}: {reason}")]
    Connection { context: String, reason: String },

    /// An API call against the context failed.
    #[error("API call on context {context:?} failed: {reason}")]
    List { context: String, reason: String },

    #[error("context {context:?} timed out after {}ms", after.as_millis())]
    Timeout { context: String, after: Duration },

    #[error("{message}")]
    ProcessExecution { context: String, message: String },

    #[error("lost cluster connection after {failures}/{max} failed probes")]
    Disconnected { failures: u32, max: u32 },

    #[error("task for context {context:?} aborted: {reason}")]
    Task { context: String, reason: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Context name for per-context failures.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::ConfigResolution { context, .. }
            | Self::Connection { context, .. }
            | Self::List { context, .. }
            | Self::Timeout { context, .. }
            | Self::ProcessExecution { context, .. }
            | Self::Task { context, .. } => Some(context),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_context_errors_expose_context() {
        let err = Error::List {
            context: "b".into(),
            reason: "connection refused".into(),
        };
        assert_eq!(err.context(), Some("b"));
        assert!(err.to_string().contains("connection refused"));

        let err = Error::Disconnected { failures: 5, max: 5 };
        assert_eq!(err.context(), None);
    }

    #[test]
    fn api_errors_do_not_claim_to_be_listings() {
        let err = Error::List {
            context: "a".into(),
            reason: "503 Service Unavailable: etcd leader changed".into(),
        };
        assert_eq!(
            err.to_string(),
            "API call on context \"a\" failed: 503 Service Unavailable: etcd leader changed"
        );
    }

    #[test]
    fn timeout_message_reports_millis() {
        let err = Error::Timeout {
            context: "a".into(),
            after: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "context \"a\" timed out after 5000ms");
    }

    #[test]
    fn process_error_displays_raw_message() {
        let err = Error::ProcessExecution {
            context: "a".into(),
            message: "error: no such resource".into(),
        };
        assert_eq!(err.to_string(), "error: no such resource");
    }
}
