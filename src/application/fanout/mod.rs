//! Multi-context fan-out: client registry, bounded dispatcher and the
//! aggregation shapes its call sites need.

pub mod aggregate;
pub mod dispatcher;
pub mod registry;

pub use dispatcher::Dispatcher;
pub use registry::ConnectionRegistry;
