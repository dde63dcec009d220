//! Cluster-agnostic domain types.

mod batch;
mod resource;
mod retry;

pub mod row;

pub use batch::{BatchResult, CommandResult};
pub use resource::{
    scoped_namespace, ContextObject, GroupVersionResource, CLUSTER_SCOPE, NA, NAMESPACE_ALL,
};
pub use retry::{ConnectivityState, RetryState};
pub use row::{RowId, MULTI_CONTEXT_SEP};
