//! Per-context outcome of one fan-out batch.

use crate::error::Error;

/// Outcome of one task in a batch, keyed by the context it ran against.
#[derive(Debug)]
pub struct BatchResult<T> {
    pub context: String,
    pub outcome: Result<T, Error>,
}

impl<T> BatchResult<T> {
    pub fn ok(context: impl Into<String>, value: T) -> Self {
        Self {
            context: context.into(),
            outcome: Ok(value),
        }
    }

    pub fn err(context: impl Into<String>, error: Error) -> Self {
        Self {
            context: context.into(),
            outcome: Err(error),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// One slot of a positional command report.
///
/// On failure `output` holds the error message as well, so a renderer can
/// treat every slot alike.
#[derive(Debug)]
pub struct CommandResult {
    pub context: String,
    pub output: String,
    pub error: Option<Error>,
}

impl CommandResult {
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
