//! Supervisor state machine and its run loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::domain::{ConnectivityState, RetryState};
use crate::error::{Error, Result};
use crate::infrastructure::config::supervisor::SupervisorConfig;
use crate::port::{ConnectivityProbe, LiveConsumer, SideRefresh, StatusLevel, StatusSink};

/// Health-check loop with capped exponential backoff and fail-fast exit.
pub struct ConnectivitySupervisor {
    probe: Arc<dyn ConnectivityProbe>,
    consumer: Arc<dyn LiveConsumer>,
    status: Arc<dyn StatusSink>,
    side_refresh: Option<Arc<dyn SideRefresh>>,
    retry: RetryState,
    cadence: Duration,
    state_tx: watch::Sender<ConnectivityState>,
}

impl ConnectivitySupervisor {
    pub fn new(
        probe: Arc<dyn ConnectivityProbe>,
        consumer: Arc<dyn LiveConsumer>,
        status: Arc<dyn StatusSink>,
        config: &SupervisorConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(ConnectivityState::Healthy);
        Self {
            probe,
            consumer,
            status,
            side_refresh: None,
            retry: config.retry_state(),
            cadence: config.refresh_interval(),
            state_tx,
        }
    }

    /// Refresh kicked off in the background after every healthy probe.
    #[must_use]
    pub fn with_side_refresh(mut self, refresh: Arc<dyn SideRefresh>) -> Self {
        self.side_refresh = Some(refresh);
        self
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ConnectivityState> {
        self.state_tx.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> ConnectivityState {
        *self.state_tx.borrow()
    }

    #[must_use]
    pub fn retry(&self) -> &RetryState {
        &self.retry
    }

    /// Run one probe and apply the transition. Returns the delay before the
    /// next probe.
    pub async fn tick(&mut self) -> Duration {
        if self.state().is_terminal() {
            return self.retry.current_delay();
        }

        if self.probe.check().await {
            self.on_success();
            return self.cadence;
        }
        self.on_failure()
    }

    fn on_success(&mut self) {
        let recovering = self.retry.consecutive_failures() > 0;
        self.retry.reset();
        self.state_tx.send_replace(ConnectivityState::Healthy);

        if recovering {
            info!("Cluster connectivity restored");
            self.status.status(StatusLevel::Info, "K8s connectivity OK");
            self.consumer.resume();
        } else {
            self.status.clear();
        }

        if let Some(refresh) = &self.side_refresh {
            let refresh = Arc::clone(refresh);
            tokio::spawn(async move {
                if let Err(e) = refresh.refresh().await {
                    warn!(error = %e, "Side refresh failed");
                }
            });
        }
    }

    fn on_failure(&mut self) -> Duration {
        let delay = self.retry.record_failure();
        let failures = self.retry.consecutive_failures();
        let max = self.retry.max_failures();
        self.consumer.pause();

        if self.retry.is_exhausted() {
            error!(retry = failures, max_retries = max, "Conn check failed. Bailing out!");
            self.state_tx
                .send_replace(ConnectivityState::FatallyDisconnected { failures });
            self.status.status(
                StatusLevel::Error,
                &format!("Lost K8s connection ({failures}). Bailing out!"),
            );
            return delay;
        }

        warn!(retry = failures, max_retries = max, ?delay, "Connectivity probe failed");
        self.state_tx
            .send_replace(ConnectivityState::Degraded { failures });
        self.status.status(
            StatusLevel::Warn,
            &format!("Dial K8s Toast [{failures}/{max}]"),
        );
        delay
    }

    /// Probe until shutdown or exhaustion.
    ///
    /// The first probe runs immediately.
    ///
    /// # Errors
    ///
    /// `Disconnected` once the retry budget is spent.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        info!(cadence = ?self.cadence, "Connectivity supervisor started");
        loop {
            if *shutdown.borrow() {
                debug!("Connectivity supervisor canceled");
                return Ok(());
            }

            let delay = self.tick().await;
            if let ConnectivityState::FatallyDisconnected { failures } = self.state() {
                return Err(Error::Disconnected {
                    failures,
                    max: self.retry.max_failures(),
                });
            }

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Connectivity supervisor canceled");
                        return Ok(());
                    }
                }
            }
        }
    }
}
