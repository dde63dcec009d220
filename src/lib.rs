//! kubefan - multi-cluster fan-out for Kubernetes.
//!
//! Lists resources, probes server versions and runs `kubectl` across many
//! kubeconfig contexts at once, with bounded concurrency and per-context
//! failure isolation. A connectivity supervisor gates live views on the
//! health of the active cluster.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Context objects, resource addressing, row identities,
//!   batch results and retry state
//! - [`port`] - Traits for cluster clients, process execution, the
//!   selection store and supervisor hooks
//! - [`adapter`] - kubeconfig + HTTP Kubernetes client, `kubectl` runner,
//!   file-backed selection, and the CLI
//! - [`application`] - Connection registry, fan-out dispatcher, result
//!   aggregation, the multi-context service and the supervisor
//! - [`infrastructure`] - Configuration, logging and the composition root
//!
//! # Example
//!
//! ```no_run
//! use kubefan::infrastructure::config::settings::Config;
//! use kubefan::infrastructure::Session;
//!
//! # async fn demo() -> kubefan::error::Result<()> {
//! let session = Session::build(Config::default())?;
//! let contexts = session.batch_contexts(&[])?;
//! let versions = session.multi.server_versions(&contexts).await;
//! for (context, version) in versions {
//!     println!("{context}: {version}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
