//! Handler for `kubefan watch`: a live listing gated by the connectivity
//! supervisor.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use futures_util::future::OptionFuture;
use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::command::WatchArgs;
use super::{list, output};
use crate::application::selection::effective_contexts;
use crate::application::{ConnectivitySupervisor, VersionProbe};
use crate::error::{Error, Result};
use crate::infrastructure::Session;
use crate::port::{LiveConsumer, SelectionStore, SideRefresh, StatusLevel, StatusSink};

/// Refresh gate flipped by the supervisor.
pub struct LiveGate(AtomicBool);

impl LiveGate {
    pub fn new() -> Self {
        Self(AtomicBool::new(true))
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for LiveGate {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveConsumer for LiveGate {
    fn pause(&self) {
        if self.0.swap(false, Ordering::SeqCst) {
            debug!("Live refresh paused");
        }
    }

    fn resume(&self) {
        if !self.0.swap(true, Ordering::SeqCst) {
            debug!("Live refresh resumed");
        }
    }
}

/// Supervisor status routed to the terminal.
struct TerminalStatus;

impl StatusSink for TerminalStatus {
    fn status(&self, level: StatusLevel, message: &str) {
        match level {
            StatusLevel::Info => {
                output::status(&Local::now().format("%H:%M:%S").to_string(), "info", message);
            }
            StatusLevel::Warn => output::warning(message),
            StatusLevel::Error => output::error(message),
        }
    }

    fn clear(&self) {}
}

/// Re-reads the persisted selection so edits from another shell take effect.
pub struct SelectionRefresh {
    store: Arc<dyn SelectionStore>,
    active: Option<String>,
    targets: Arc<RwLock<Vec<String>>>,
}

impl SelectionRefresh {
    pub fn new(
        store: Arc<dyn SelectionStore>,
        active: Option<String>,
        targets: Arc<RwLock<Vec<String>>>,
    ) -> Self {
        Self {
            store,
            active,
            targets,
        }
    }
}

#[async_trait]
impl SideRefresh for SelectionRefresh {
    async fn refresh(&self) -> Result<()> {
        let selected = self.store.load()?;
        let fresh = effective_contexts(&selected, self.active.as_deref());
        let mut targets = self.targets.write();
        if *targets != fresh {
            info!(contexts = ?fresh, "Watch targets changed");
            *targets = fresh;
        }
        Ok(())
    }
}

/// Why the watch loop stopped.
#[derive(Debug)]
pub enum WatchExit {
    /// The shutdown signal fired.
    Interrupted,
    /// The supervisor task finished on its own.
    Supervisor(Result<()>),
}

/// Drive refresh passes on `interval` while `gate` is live.
///
/// A pass in flight is polled alongside `shutdown` and the supervisor, so a
/// listing stuck on a dead API server never delays either. At most one pass
/// runs at a time; ticks that land during a pass are skipped.
pub async fn drive<F, Fut>(
    supervisor: &mut JoinHandle<Result<()>>,
    shutdown: impl Future<Output = ()>,
    interval: Duration,
    gate: &LiveGate,
    mut pass: F,
) -> WatchExit
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut in_flight: Option<Pin<Box<Fut>>> = None;

    loop {
        tokio::select! {
            () = &mut shutdown => return WatchExit::Interrupted,

            joined = &mut *supervisor => {
                return WatchExit::Supervisor(joined.unwrap_or_else(|e| {
                    Err(Error::Task {
                        context: String::new(),
                        reason: e.to_string(),
                    })
                }));
            }

            Some(()) = OptionFuture::from(in_flight.as_mut()), if in_flight.is_some() => {
                in_flight = None;
            }

            _ = ticker.tick(), if in_flight.is_none() => {
                if gate.is_live() {
                    in_flight = Some(Box::pin(pass()));
                }
            }
        }
    }
}

/// List once and render the merged table.
async fn render_pass(session: &Session, args: &WatchArgs, targets: &RwLock<Vec<String>>) {
    let contexts = targets.read().clone();
    let objects = session
        .multi
        .list_across_contexts(
            &contexts,
            &args.resource,
            args.namespace.as_deref(),
            args.selector.as_deref(),
        )
        .await;
    let multi = contexts.len() > 1;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "command": "watch",
            "at": chrono::Utc::now().to_rfc3339(),
            "items": list::items_json(&objects, multi),
        }));
        return;
    }
    output::section(&format!(
        "{} on {} context(s) at {}",
        args.resource,
        contexts.len(),
        Local::now().format("%H:%M:%S")
    ));
    output::raw(&format!("{}\n", list::render(&objects, multi)));
}

/// Execute the watch command until Ctrl-C or a lost connection.
pub async fn execute(session: &Session, args: WatchArgs) -> Result<()> {
    let active = session.active_context().ok_or_else(|| Error::ConfigResolution {
        context: String::new(),
        reason: "no active context to supervise".to_string(),
    })?;
    let explicit = !args.target.contexts.is_empty();
    let targets = Arc::new(RwLock::new(session.batch_contexts(&args.target.contexts)?));

    let gate = Arc::new(LiveGate::new());
    let probe = Arc::new(VersionProbe::new(
        Arc::clone(&session.registry),
        active.clone(),
        session.config.supervisor.probe_timeout(),
    ));
    let mut supervisor = ConnectivitySupervisor::new(
        probe,
        gate.clone(),
        Arc::new(TerminalStatus),
        &session.config.supervisor,
    );
    if !explicit {
        supervisor = supervisor.with_side_refresh(Arc::new(SelectionRefresh::new(
            Arc::clone(&session.selection),
            Some(active),
            Arc::clone(&targets),
        )));
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut supervisor_task = tokio::spawn(supervisor.run(shutdown_rx));
    output::hint("press Ctrl-C to stop");

    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    let targets = &*targets;
    let args = &args;
    let exit = drive(
        &mut supervisor_task,
        ctrl_c,
        Duration::from_secs(args.interval.max(1)),
        &gate,
        move || render_pass(session, args, targets),
    )
    .await;

    match exit {
        WatchExit::Interrupted => {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
            let _ = supervisor_task.await;
            Ok(())
        }
        WatchExit::Supervisor(result) => result,
    }
}
