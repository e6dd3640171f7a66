//! Kubernetes API adapter for the registry ports
//!
//! Every call is a fresh GET/LIST against the API server. Nothing is cached,
//! so callers always see current state.

use crate::crd::{CephCluster, CephObjectStore};
use crate::domain::ports::{ClusterRegistry, ServiceRegistry, StoreRegistry};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use kube::api::{Api, ListParams};
use kube::Client;
use tracing::debug;

/// Registry backed by a live Kubernetes client
#[derive(Clone)]
pub struct KubeRegistry {
    client: Client,
}

impl KubeRegistry {
    /// Create a registry over an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a registry from the ambient kubeconfig / in-cluster config
    pub async fn try_default() -> Result<Self, kube::Error> {
        Ok(Self::new(Client::try_default().await?))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ClusterRegistry for KubeRegistry {
    async fn list_clusters(&self, namespace: &str) -> Result<Vec<CephCluster>, kube::Error> {
        let api: Api<CephCluster> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        debug!(namespace = %namespace, count = list.items.len(), "Listed ceph clusters");
        Ok(list.items)
    }
}

#[async_trait]
impl StoreRegistry for KubeRegistry {
    async fn get_store(&self, namespace: &str, name: &str) -> Result<CephObjectStore, kube::Error> {
        let api: Api<CephObjectStore> = Api::namespaced(self.client.clone(), namespace);
        api.get(name).await
    }
}

#[async_trait]
impl ServiceRegistry for KubeRegistry {
    async fn get_service(&self, namespace: &str, name: &str) -> Result<Service, kube::Error> {
        let api: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        api.get(name).await
    }
}
