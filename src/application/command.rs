//! `kubectl` argument rewriting, output folding and report rendering.

use std::fmt::Write as _;

use crate::domain::CommandResult;
use crate::error::{Error, Result};
use crate::port::CommandOutput;

/// Flag that selects the kubeconfig context.
pub const CONTEXT_FLAG: &str = "--context";

/// Insert `--context <context>` before the first `--`, or append it.
#[must_use]
pub fn inject_context_flag(args: &[String], context: &str) -> Vec<String> {
    let mut local = Vec::with_capacity(args.len() + 2);
    let split = args.iter().position(|a| a == "--").unwrap_or(args.len());
    local.extend_from_slice(&args[..split]);
    local.push(CONTEXT_FLAG.to_string());
    local.push(context.to_string());
    local.extend_from_slice(&args[split..]);
    local
}

/// Turn a finished (or failed-to-start) process into the slot outcome.
///
/// Failures carry the trimmed stderr, or the exit/spawn error when stderr
/// is empty.
pub fn fold_output(context: &str, result: std::io::Result<CommandOutput>) -> Result<String> {
    let output = match result {
        Ok(output) => output,
        Err(e) => {
            return Err(Error::ProcessExecution {
                context: context.to_string(),
                message: e.to_string(),
            })
        }
    };
    if output.success {
        return Ok(output.stdout);
    }

    let stderr = output.stderr.trim();
    let message = if stderr.is_empty() {
        match output.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        }
    } else {
        stderr.to_string()
    };
    Err(Error::ProcessExecution {
        context: context.to_string(),
        message,
    })
}

/// Plain-text report, one underlined section per context.
#[must_use]
pub fn format_results(results: &[CommandResult]) -> String {
    let mut report = String::new();
    for result in results {
        let header = &result.context;
        let _ = write!(report, "\n{header}\n{}\n", "-".repeat(header.len()));
        if result.is_error() {
            let _ = writeln!(report, "  (error) {}", result.output);
        } else {
            report.push_str(&result.output);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn context_flag_is_appended() {
        assert_eq!(
            inject_context_flag(&args(&["get", "pods"]), "ctx1"),
            args(&["get", "pods", "--context", "ctx1"])
        );
        assert_eq!(
            inject_context_flag(&[], "ctx1"),
            args(&["--context", "ctx1"])
        );
    }

    #[test]
    fn context_flag_goes_before_first_separator() {
        assert_eq!(
            inject_context_flag(&args(&["exec", "p", "--", "ls"]), "ctx1"),
            args(&["exec", "p", "--context", "ctx1", "--", "ls"])
        );
        assert_eq!(
            inject_context_flag(&args(&["exec", "p", "--", "sh", "--", "x"]), "c"),
            args(&["exec", "p", "--context", "c", "--", "sh", "--", "x"])
        );
    }

    #[test]
    fn failed_process_prefers_stderr() {
        let err = fold_output("a", Ok(CommandOutput::failed(1, "  error: forbidden\n")))
            .unwrap_err();
        assert_eq!(err.to_string(), "error: forbidden");
        assert_eq!(err.context(), Some("a"));

        let err = fold_output("a", Ok(CommandOutput::failed(2, ""))).unwrap_err();
        assert_eq!(err.to_string(), "exit status 2");

        let spawn = std::io::Error::new(std::io::ErrorKind::NotFound, "kubectl not found");
        let err = fold_output("a", Err(spawn)).unwrap_err();
        assert!(matches!(err, Error::ProcessExecution { .. }));
        assert_eq!(err.to_string(), "kubectl not found");
    }

    #[test]
    fn report_sections_are_underlined() {
        let results = vec![
            CommandResult {
                context: "prod".into(),
                output: "node-1   Ready\n".into(),
                error: None,
            },
            CommandResult {
                context: "dev".into(),
                output: "unreachable".into(),
                error: Some(Error::ProcessExecution {
                    context: "dev".into(),
                    message: "unreachable".into(),
                }),
            },
        ];
        assert_eq!(
            format_results(&results),
            "\nprod\n----\nnode-1   Ready\n\ndev\n---\n  (error) unreachable\n"
        );
    }
}
