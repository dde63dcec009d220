//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! use-case logic: configuration loading and the composition root.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;

pub use bootstrap::Session;
