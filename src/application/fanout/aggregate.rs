//! Result shapes built from a fan-out batch.
//!
//! Per-context errors stop here: they become a warning plus an omitted
//! entry, a sentinel value, or a folded error slot. None of these turns into
//! a batch-level failure.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::domain::{BatchResult, CommandResult, ContextObject};

/// Concatenate successful lists, tagging each object with its context.
///
/// Failed contexts are logged and left out.
pub fn tagged_list(results: Vec<BatchResult<Vec<Value>>>) -> Vec<ContextObject> {
    let mut merged = Vec::new();
    for result in results {
        match result.outcome {
            Ok(objects) => {
                let context = result.context;
                merged.extend(
                    objects
                        .into_iter()
                        .map(|object| ContextObject::new(context.clone(), object)),
                );
            }
            Err(e) => {
                warn!(context = %result.context, error = %e, "Listing failed for context");
            }
        }
    }
    merged
}

/// One entry per context; failures map to `sentinel`.
pub fn keyed_with_sentinel(
    results: Vec<BatchResult<String>>,
    sentinel: &str,
) -> BTreeMap<String, String> {
    results
        .into_iter()
        .map(|result| {
            let value = match result.outcome {
                Ok(value) => value,
                Err(e) => {
                    warn!(context = %result.context, error = %e, "Falling back to sentinel");
                    sentinel.to_string()
                }
            };
            (result.context, value)
        })
        .collect()
}

/// Positional slots; an error's message is also written to the output.
pub fn positional_folded(results: Vec<BatchResult<String>>) -> Vec<CommandResult> {
    results
        .into_iter()
        .map(|result| match result.outcome {
            Ok(output) => CommandResult {
                context: result.context,
                output,
                error: None,
            },
            Err(e) => CommandResult {
                context: result.context,
                output: e.to_string(),
                error: Some(e),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NA;
    use crate::error::Error;
    use serde_json::json;

    fn list_err(context: &str) -> Error {
        Error::List {
            context: context.into(),
            reason: "dial tcp: connection refused".into(),
        }
    }

    #[test]
    fn tagged_list_skips_failed_contexts() {
        let merged = tagged_list(vec![
            BatchResult::ok("a", vec![json!({"metadata": {"name": "a-1"}})]),
            BatchResult::err("b", list_err("b")),
            BatchResult::ok(
                "c",
                vec![
                    json!({"metadata": {"name": "c-1"}}),
                    json!({"metadata": {"name": "c-2"}}),
                ],
            ),
        ]);

        let tagged: Vec<(&str, &str)> = merged
            .iter()
            .map(|o| (o.context.as_str(), o.name()))
            .collect();
        assert_eq!(tagged, vec![("a", "a-1"), ("c", "c-1"), ("c", "c-2")]);
    }

    #[test]
    fn keyed_map_is_fully_populated() {
        let map = keyed_with_sentinel(
            vec![
                BatchResult::ok("a", "v1.29.0".to_string()),
                BatchResult::err(
                    "b",
                    Error::Timeout {
                        context: "b".into(),
                        after: std::time::Duration::from_secs(5),
                    },
                ),
            ],
            NA,
        );
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "v1.29.0");
        assert_eq!(map["b"], "N/A");
    }

    #[test]
    fn positional_folds_error_text_into_output() {
        let slots = positional_folded(vec![
            BatchResult::ok("a", "node-1 Ready".to_string()),
            BatchResult::err(
                "b",
                Error::ProcessExecution {
                    context: "b".into(),
                    message: "error: You must be logged in".into(),
                },
            ),
        ]);
        assert_eq!(slots[0].context, "a");
        assert!(!slots[0].is_error());
        assert_eq!(slots[1].context, "b");
        assert!(slots[1].is_error());
        assert_eq!(slots[1].output, "error: You must be logged in");
    }
}
