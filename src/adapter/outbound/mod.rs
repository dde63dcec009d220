//! Outbound adapters (driven side).

pub mod kubectl;
pub mod kubernetes;
pub mod selection;
