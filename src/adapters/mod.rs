//! Port adapters
//!
//! - KubeRegistry: live Kubernetes API
//! - InMemoryRegistry: fixed resources and injected failures, for tests
//! - OsEntropy: OS random source

pub mod entropy;
pub mod in_memory;
pub mod kube_registry;

pub use entropy::*;
pub use in_memory::*;
pub use kube_registry::*;
