//! Domain Ports - collaborator traits for the bucket provisioner
//!
//! These traits define the boundaries between the resolution logic and the
//! Kubernetes API / OS entropy. Adapters implement them; the resolver only
//! depends on the traits.
//!
//! Registry errors are raw [`kube::Error`]s so the resolver can tell a 404
//! apart from every other failure.

use crate::crd::{CephCluster, CephObjectStore};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use std::sync::Arc;

// =============================================================================
// Registry Ports
// =============================================================================

/// Lists CephCluster resources
#[async_trait]
pub trait ClusterRegistry: Send + Sync {
    /// List all clusters in a namespace, in the order the API returns them
    async fn list_clusters(&self, namespace: &str) -> Result<Vec<CephCluster>, kube::Error>;
}

/// Fetches CephObjectStore resources
#[async_trait]
pub trait StoreRegistry: Send + Sync {
    async fn get_store(&self, namespace: &str, name: &str) -> Result<CephObjectStore, kube::Error>;
}

/// Fetches core/v1 Services
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    async fn get_service(&self, namespace: &str, name: &str) -> Result<Service, kube::Error>;
}

// =============================================================================
// Entropy Port
// =============================================================================

/// Cryptographically strong byte source.
///
/// Implementations must be safe to call from many tasks at once.
pub trait EntropySource: Send + Sync {
    /// Fill `buf` completely or fail
    fn fill(&self, buf: &mut [u8]) -> Result<(), rand::Error>;
}

// =============================================================================
// Type Aliases for Arc'd Traits
// =============================================================================

pub type ClusterRegistryRef = Arc<dyn ClusterRegistry>;
pub type StoreRegistryRef = Arc<dyn StoreRegistry>;
pub type ServiceRegistryRef = Arc<dyn ServiceRegistry>;
pub type EntropySourceRef = Arc<dyn EntropySource>;
