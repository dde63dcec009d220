//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! The application layer talks to clusters, processes and the filesystem only
//! through these traits; adapters implement them.
//!
//! # Available Ports
//!
//! - [`ClusterClient`], [`ClientFactory`], [`ContextSource`] - Kubernetes API access
//! - [`CommandRunner`] - External `kubectl` execution
//! - [`SelectionStore`] - Persisted selected-context list
//! - [`ConnectivityProbe`], [`LiveConsumer`], [`StatusSink`], [`SideRefresh`] - Supervisor hooks

pub mod outbound;

pub use outbound::cluster::{ClientFactory, ClusterClient, ContextSource};
pub use outbound::process::{CommandOutput, CommandRunner};
pub use outbound::selection::SelectionStore;
pub use outbound::supervision::{
    ConnectivityProbe, LiveConsumer, SideRefresh, StatusLevel, StatusSink,
};
