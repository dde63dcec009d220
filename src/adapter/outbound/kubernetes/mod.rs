//! Kubernetes API adapter: kubeconfig resolution and per-context HTTP clients.

pub mod client;
pub mod factory;
pub mod kubeconfig;
pub mod limiter;

pub use client::KubeClient;
pub use factory::KubeClientFactory;
pub use kubeconfig::{Kubeconfig, KubeconfigSource};
