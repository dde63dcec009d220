//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod command;
pub mod fanout;
pub mod multi;
pub mod selection;
pub mod supervisor;

pub use fanout::{ConnectionRegistry, Dispatcher};
pub use multi::MultiContext;
pub use supervisor::{ConnectivitySupervisor, VersionProbe};
