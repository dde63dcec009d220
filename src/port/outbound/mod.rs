//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod cluster;
pub mod process;
pub mod selection;
pub mod supervision;
