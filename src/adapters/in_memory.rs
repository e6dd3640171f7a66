//! In-memory registry
//!
//! Serves fixed CephClusters, CephObjectStores and Services without an API
//! server. Lookups can be made to fail with any HTTP status code, which is
//! how tests exercise the NotFound / Other error paths.
//!
//! The registry is immutable once built.

use crate::crd::{CephCluster, CephObjectStore};
use crate::domain::ports::{ClusterRegistry, ServiceRegistry, StoreRegistry};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use kube::core::ErrorResponse;
use std::collections::BTreeMap;

type Key = (String, String);

/// Injected failure for one lookup
#[derive(Debug, Clone)]
struct Failure {
    code: u16,
    reason: String,
}

impl Failure {
    fn to_error(&self) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("injected failure: {}", self.reason),
            reason: self.reason.clone(),
            code: self.code,
        })
    }
}

fn not_found(kind: &str, namespace: &str, name: &str) -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: format!("{} \"{}\" not found in namespace \"{}\"", kind, name, namespace),
        reason: "NotFound".to_string(),
        code: 404,
    })
}

fn key(namespace: &str, name: &str) -> Key {
    (namespace.to_string(), name.to_string())
}

/// Registry serving resources from memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    clusters: BTreeMap<String, Vec<CephCluster>>,
    stores: BTreeMap<Key, CephObjectStore>,
    services: BTreeMap<Key, Service>,
    cluster_failures: BTreeMap<String, Failure>,
    store_failures: BTreeMap<Key, Failure>,
    service_failures: BTreeMap<Key, Failure>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cluster; listing returns clusters in insertion order
    pub fn with_cluster(mut self, namespace: &str, cluster: CephCluster) -> Self {
        self.clusters
            .entry(namespace.to_string())
            .or_default()
            .push(cluster);
        self
    }

    pub fn with_store(mut self, namespace: &str, store: CephObjectStore) -> Self {
        let name = store.name().to_string();
        self.stores.insert(key(namespace, &name), store);
        self
    }

    pub fn with_service(mut self, namespace: &str, service: Service) -> Self {
        let name = service.metadata.name.clone().unwrap_or_default();
        self.services.insert(key(namespace, &name), service);
        self
    }

    /// Make cluster listing in `namespace` fail with `code`
    pub fn fail_cluster_list(mut self, namespace: &str, code: u16, reason: &str) -> Self {
        self.cluster_failures.insert(
            namespace.to_string(),
            Failure {
                code,
                reason: reason.to_string(),
            },
        );
        self
    }

    /// Make fetching store `name` fail with `code`
    pub fn fail_store(mut self, namespace: &str, name: &str, code: u16, reason: &str) -> Self {
        self.store_failures.insert(
            key(namespace, name),
            Failure {
                code,
                reason: reason.to_string(),
            },
        );
        self
    }

    /// Make fetching service `name` fail with `code`
    pub fn fail_service(mut self, namespace: &str, name: &str, code: u16, reason: &str) -> Self {
        self.service_failures.insert(
            key(namespace, name),
            Failure {
                code,
                reason: reason.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl ClusterRegistry for InMemoryRegistry {
    async fn list_clusters(&self, namespace: &str) -> Result<Vec<CephCluster>, kube::Error> {
        if let Some(failure) = self.cluster_failures.get(namespace) {
            return Err(failure.to_error());
        }
        Ok(self.clusters.get(namespace).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl StoreRegistry for InMemoryRegistry {
    async fn get_store(&self, namespace: &str, name: &str) -> Result<CephObjectStore, kube::Error> {
        let k = key(namespace, name);
        if let Some(failure) = self.store_failures.get(&k) {
            return Err(failure.to_error());
        }
        self.stores
            .get(&k)
            .cloned()
            .ok_or_else(|| not_found("cephobjectstores.ceph.rook.io", namespace, name))
    }
}

#[async_trait]
impl ServiceRegistry for InMemoryRegistry {
    async fn get_service(&self, namespace: &str, name: &str) -> Result<Service, kube::Error> {
        let k = key(namespace, name);
        if let Some(failure) = self.service_failures.get(&k) {
            return Err(failure.to_error());
        }
        self.services
            .get(&k)
            .cloned()
            .ok_or_else(|| not_found("services", namespace, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{CephClusterSpec, CephObjectStoreSpec};
    use crate::error::is_kube_not_found;

    #[tokio::test]
    async fn test_cluster_listing_order() {
        let registry = InMemoryRegistry::new()
            .with_cluster("rook-ceph", CephCluster::new("a", CephClusterSpec::default()))
            .with_cluster("rook-ceph", CephCluster::new("b", CephClusterSpec::default()));

        let clusters = registry.list_clusters("rook-ceph").await.unwrap();
        let names: Vec<_> = clusters.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["a", "b"]);

        assert!(registry.list_clusters("other").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_store_is_404() {
        let registry = InMemoryRegistry::new()
            .with_store("rook-ceph", CephObjectStore::new("store1", CephObjectStoreSpec::default()));

        assert!(registry.get_store("rook-ceph", "store1").await.is_ok());

        let err = registry.get_store("rook-ceph", "nope").await.unwrap_err();
        assert!(is_kube_not_found(&err));
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let registry = InMemoryRegistry::new().fail_service("rook-ceph", "svc", 403, "Forbidden");

        let err = registry.get_service("rook-ceph", "svc").await.unwrap_err();
        assert!(!is_kube_not_found(&err));
        assert!(err.to_string().contains("Forbidden"));
    }
}
