//! Bounded-concurrency fan-out over a list of contexts.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::BatchResult;
use crate::error::{Error, Result};
use crate::infrastructure::config::fanout::DEFAULT_MAX_PARALLEL;

/// Runs one task per context behind an admission semaphore.
///
/// Every task is spawned up front; at most `max_parallel` of them are past
/// the semaphore at any time. `run` joins all of them before returning and
/// always yields one result per input context, in input order.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    max_parallel: usize,
    task_timeout: Option<Duration>,
}

impl Dispatcher {
    /// `max_parallel == 0` means the default of 10.
    #[must_use]
    pub fn new(max_parallel: usize) -> Self {
        Self {
            max_parallel: if max_parallel == 0 {
                DEFAULT_MAX_PARALLEL
            } else {
                max_parallel
            },
            task_timeout: None,
        }
    }

    /// Bound each task (after admission) by `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.task_timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    #[must_use]
    pub fn task_timeout(&self) -> Option<Duration> {
        self.task_timeout
    }

    /// Run `op` once per context.
    ///
    /// A failing, timed-out or panicking task only affects its own slot.
    pub async fn run<T, F, Fut>(&self, contexts: &[String], op: F) -> Vec<BatchResult<T>>
    where
        T: Send + 'static,
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        // More permits than tasks buys nothing, and stays under MAX_PERMITS.
        let bound = self.max_parallel.min(contexts.len().max(1));
        debug!(
            tasks = contexts.len(),
            max_parallel = bound,
            "Dispatching fan-out batch"
        );

        let semaphore = Arc::new(Semaphore::new(bound));
        let handles: Vec<_> = contexts
            .iter()
            .map(|context| {
                let semaphore = Arc::clone(&semaphore);
                let task = op(context.clone());
                let context = context.clone();
                let timeout = self.task_timeout;

                tokio::spawn(async move {
                    let _permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(e) => {
                            return Err(Error::Task {
                                context,
                                reason: e.to_string(),
                            })
                        }
                    };
                    match timeout {
                        Some(after) => tokio::time::timeout(after, task)
                            .await
                            .unwrap_or_else(|_| {
                                debug!(context = %context, ?after, "Task timed out");
                                Err(Error::Timeout { context, after })
                            }),
                        None => task.await,
                    }
                })
            })
            .collect();

        let joined = join_all(handles).await;
        contexts
            .iter()
            .zip(joined)
            .map(|(context, joined)| {
                let outcome = joined.unwrap_or_else(|e| {
                    Err(Error::Task {
                        context: context.clone(),
                        reason: e.to_string(),
                    })
                });
                BatchResult {
                    context: context.clone(),
                    outcome,
                }
            })
            .collect()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PARALLEL)
    }
}
