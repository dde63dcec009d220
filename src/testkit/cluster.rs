//! Scripted [`ClusterClient`] and [`ClientFactory`] implementations.
//!
//! Each context gets a [`ContextScript`] describing what its client returns,
//! how long it takes, and whether it fails or hangs. All clients built by one
//! [`ScriptedFactory`] share an [`InFlight`] gauge so tests can assert the
//! peak number of concurrently running calls.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::domain::GroupVersionResource;
use crate::error::{Error, Result};
use crate::port::{ClientFactory, ClusterClient, ContextSource};

/// Tracks how many calls are in progress and the highest value seen.
#[derive(Debug, Default)]
pub struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
    total: AtomicUsize,
}

impl InFlight {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mark a call as running until the guard drops.
    pub fn enter(self: &Arc<Self>) -> InFlightGuard {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.total.fetch_add(1, Ordering::SeqCst);
        InFlightGuard(Arc::clone(self))
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

pub struct InFlightGuard(Arc<InFlight>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.current.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Scripted behavior of one context.
#[derive(Debug, Clone)]
pub struct ContextScript {
    pub objects: Vec<Value>,
    pub version: String,
    pub failure: Option<String>,
    pub hang: bool,
    pub delay: Duration,
}

impl ContextScript {
    pub fn healthy(version: &str) -> Self {
        Self {
            objects: Vec::new(),
            version: version.to_string(),
            failure: None,
            hang: false,
            delay: Duration::ZERO,
        }
    }

    /// Every API call fails with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::healthy("")
        }
    }

    /// Every API call never completes.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::healthy("")
        }
    }

    pub fn with_objects(mut self, objects: Vec<Value>) -> Self {
        self.objects = objects;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Minimal object with `metadata.namespace` and `metadata.name`.
pub fn object(namespace: &str, name: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "labels": { "app": name },
        },
    })
}

/// Client that plays back a [`ContextScript`].
pub struct ScriptedClient {
    context: String,
    script: ContextScript,
    in_flight: Arc<InFlight>,
}

impl ScriptedClient {
    pub fn new(context: &str, script: ContextScript, in_flight: Arc<InFlight>) -> Self {
        Self {
            context: context.to_string(),
            script,
            in_flight,
        }
    }

    async fn play(&self) -> Result<()> {
        let _guard = self.in_flight.enter();
        if self.script.hang {
            std::future::pending::<()>().await;
        }
        if !self.script.delay.is_zero() {
            tokio::time::sleep(self.script.delay).await;
        }
        match &self.script.failure {
            Some(reason) => Err(Error::List {
                context: self.context.clone(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ClusterClient for ScriptedClient {
    fn context(&self) -> &str {
        &self.context
    }

    async fn list(
        &self,
        _gvr: &GroupVersionResource,
        namespace: Option<&str>,
        label_selector: Option<&str>,
    ) -> Result<Vec<Value>> {
        self.play().await?;
        let app = label_selector.and_then(|s| s.strip_prefix("app="));
        Ok(self
            .script
            .objects
            .iter()
            .filter(|o| namespace.map_or(true, |ns| o["metadata"]["namespace"] == ns))
            .filter(|o| app.map_or(true, |app| o["metadata"]["labels"]["app"] == app))
            .cloned()
            .collect())
    }

    async fn get(
        &self,
        _gvr: &GroupVersionResource,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Value> {
        self.play().await?;
        self.script
            .objects
            .iter()
            .find(|o| {
                o["metadata"]["name"] == name
                    && namespace.map_or(true, |ns| o["metadata"]["namespace"] == ns)
            })
            .cloned()
            .ok_or_else(|| Error::List {
                context: self.context.clone(),
                reason: format!("404 Not Found: {name:?} not found"),
            })
    }

    async fn server_version(&self) -> Result<String> {
        self.play().await?;
        Ok(self.script.version.clone())
    }
}

/// Factory over a fixed set of scripted contexts.
///
/// Unknown contexts fail to resolve; contexts registered with
/// [`with_broken`](Self::with_broken) fail client construction.
pub struct ScriptedFactory {
    scripts: Mutex<HashMap<String, ContextScript>>,
    order: Vec<String>,
    broken: Vec<String>,
    current: Option<String>,
    builds: Mutex<HashMap<String, usize>>,
    in_flight: Arc<InFlight>,
}

impl ScriptedFactory {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            order: Vec::new(),
            broken: Vec::new(),
            current: None,
            builds: Mutex::new(HashMap::new()),
            in_flight: InFlight::new(),
        }
    }

    pub fn with_context(mut self, name: &str, script: ContextScript) -> Self {
        if self.current.is_none() {
            self.current = Some(name.to_string());
        }
        self.order.push(name.to_string());
        self.scripts.lock().insert(name.to_string(), script);
        self
    }

    pub fn with_broken(mut self, name: &str) -> Self {
        self.order.push(name.to_string());
        self.broken.push(name.to_string());
        self
    }

    pub fn with_current(mut self, name: &str) -> Self {
        self.current = Some(name.to_string());
        self
    }

    /// Change what future clients for `name` do.
    pub fn set_script(&self, name: &str, script: ContextScript) {
        self.scripts.lock().insert(name.to_string(), script);
    }

    pub fn in_flight(&self) -> Arc<InFlight> {
        Arc::clone(&self.in_flight)
    }

    /// Number of clients built for `name`.
    pub fn builds(&self, name: &str) -> usize {
        self.builds.lock().get(name).copied().unwrap_or(0)
    }
}

impl Default for ScriptedFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientFactory for ScriptedFactory {
    fn build(&self, context: &str) -> Result<Arc<dyn ClusterClient>> {
        if self.broken.iter().any(|b| b == context) {
            return Err(Error::Connection {
                context: context.to_string(),
                reason: "scripted construction failure".to_string(),
            });
        }
        let script = self
            .scripts
            .lock()
            .get(context)
            .cloned()
            .ok_or_else(|| Error::ConfigResolution {
                context: context.to_string(),
                reason: "context not found".to_string(),
            })?;
        *self.builds.lock().entry(context.to_string()).or_default() += 1;
        Ok(Arc::new(ScriptedClient::new(
            context,
            script,
            Arc::clone(&self.in_flight),
        )))
    }
}

impl ContextSource for ScriptedFactory {
    fn context_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn current_context(&self) -> Option<String> {
        self.current.clone()
    }
}
