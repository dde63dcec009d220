//! Miette-based error diagnostics for CLI error presentation.
//!
//! Turns configuration parse failures and a lost cluster connection into
//! rich reports with source context and help text.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(kubefan::config))]
pub struct ConfigDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// The configuration file.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    /// Build from a TOML parse error over `content` read from `path`.
    #[must_use]
    pub fn from_toml(path: &Path, content: &str, error: &toml::de::Error) -> Self {
        Self {
            message: error.message().to_string(),
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: error.span().map(|range| (range.start, range.len()).into()),
            help: Some("see `[fanout]`, `[client]` and `[supervisor]` in the README".to_string()),
        }
    }
}

/// The connectivity supervisor gave up on the active context.
#[derive(Debug, Error, Diagnostic)]
#[error("lost cluster connection after {failures}/{max} failed probes")]
#[diagnostic(
    code(kubefan::connection),
    help("check VPN/network access and the kubeconfig credentials, then rerun")
)]
pub struct ConnectionLost {
    pub failures: u32,
    pub max: u32,
}

/// Render a diagnostic to stderr.
pub fn report(diagnostic: impl Diagnostic + Send + Sync + 'static) {
    eprintln!("{:?}", miette::Report::new(diagnostic));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_errors_carry_a_span() {
        let content = "[fanout]\nmax_parallel = = 1\n";
        let err = toml::from_str::<toml::Value>(content).unwrap_err();
        let diag = ConfigDiagnostic::from_toml(Path::new("config.toml"), content, &err);
        assert!(diag.span.is_some());
        assert!(!diag.message.is_empty());
    }

    #[test]
    fn connection_lost_message() {
        let diag = ConnectionLost { failures: 5, max: 5 };
        assert_eq!(
            diag.to_string(),
            "lost cluster connection after 5/5 failed probes"
        );
    }
}
