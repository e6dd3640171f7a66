//! Bucket Resolver
//!
//! Ties the lookups together for one claim:
//! - storage class parameters -> object store identity
//! - CephCluster and CephObjectStore existence
//! - RGW service -> endpoint address
//! - bucket name, quota and ceph user
//!
//! The resolver holds no mutable state and can be shared across tasks.

use crate::adapters::OsEntropy;
use crate::crd::{CephCluster, CephObjectStore, ObjectBucket, ObjectBucketClaim};
use crate::domain::ports::{
    ClusterRegistryRef, EntropySourceRef, ServiceRegistryRef, StoreRegistryRef,
};
use crate::error::Result;
use crate::provisioner::bucket::{self, BucketSource, QuotaOptions};
use crate::provisioner::cluster::{self, ClusterLookup};
use crate::provisioner::config::ResolverConfig;
use crate::provisioner::endpoint::{self, EndpointAddress};
use crate::provisioner::params::StorageClassParams;
use crate::provisioner::random;
use crate::provisioner::store;
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::api::storage::v1::StorageClass;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, info_span, Instrument, Span};

// =============================================================================
// Bucket Plan
// =============================================================================

/// Everything the creation layer needs to provision a claim's bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketPlan {
    /// CephCluster backing the store
    pub cluster: String,
    /// CephObjectStore name
    pub object_store: String,
    /// CephObjectStore namespace
    pub object_store_namespace: String,
    /// Bucket host
    pub bucket_host: String,
    /// Bucket port
    pub bucket_port: i32,
    /// Bucket to attach to or create
    pub bucket: BucketSource,
    /// Quota passed through from the claim
    pub quota: QuotaOptions,
    /// Ceph user to create for the bucket
    pub ceph_user: String,
    /// When the plan was computed
    pub resolved_at: DateTime<Utc>,
}

// =============================================================================
// Bucket Resolver
// =============================================================================

/// Resolves bucket claims against the Ceph resources in the cluster
#[derive(Clone)]
pub struct BucketResolver {
    config: ResolverConfig,
    clusters: ClusterRegistryRef,
    stores: StoreRegistryRef,
    services: ServiceRegistryRef,
    entropy: EntropySourceRef,
    span: Span,
}

impl BucketResolver {
    /// Create a resolver using OS entropy and a span named after the provisioner
    pub fn new(
        config: ResolverConfig,
        clusters: ClusterRegistryRef,
        stores: StoreRegistryRef,
        services: ServiceRegistryRef,
    ) -> Self {
        let span = info_span!("bucket_provisioner", provisioner = %config.provisioner_name());
        Self {
            config,
            clusters,
            stores,
            services,
            entropy: Arc::new(OsEntropy),
            span,
        }
    }

    /// Create a resolver over one registry implementing every lookup
    pub fn from_registry<R>(config: ResolverConfig, registry: Arc<R>) -> Self
    where
        R: crate::domain::ports::ClusterRegistry
            + crate::domain::ports::StoreRegistry
            + crate::domain::ports::ServiceRegistry
            + 'static,
    {
        Self::new(config, registry.clone(), registry.clone(), registry)
    }

    /// Replace the span lookups are recorded under
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Replace the random source
    pub fn with_entropy(mut self, entropy: EntropySourceRef) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// The CephCluster owning `namespace`, per the configured cluster policy
    pub async fn locate_cluster(&self, namespace: &str) -> Result<CephCluster> {
        cluster::locate_cluster(self.clusters.as_ref(), namespace, self.config.cluster_policy)
            .instrument(self.span.clone())
            .await
    }

    /// Tagged lookup result, leaving ambiguity handling to the caller
    pub async fn lookup_cluster(&self, namespace: &str) -> Result<ClusterLookup> {
        cluster::lookup_cluster(self.clusters.as_ref(), namespace)
            .instrument(self.span.clone())
            .await
    }

    pub async fn locate_store(&self, namespace: &str, name: &str) -> Result<CephObjectStore> {
        store::locate_store(self.stores.as_ref(), namespace, name)
            .instrument(self.span.clone())
            .await
    }

    pub async fn resolve_endpoint(&self, namespace: &str, service_name: &str) -> Result<Service> {
        endpoint::resolve_endpoint(self.services.as_ref(), namespace, service_name)
            .instrument(self.span.clone())
            .await
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn effective_bucket_name<'a>(&self, ob: &'a ObjectBucket) -> &'a str {
        bucket::effective_bucket_name(ob)
    }

    pub fn quota(&self, claim: &ObjectBucketClaim) -> (String, String) {
        bucket::quota(claim)
    }

    pub fn credential_key<'a>(&self, ob: &'a ObjectBucket) -> &'a str {
        bucket::credential_key(ob)
    }

    pub fn random_identifier(&self, len: usize) -> Result<String> {
        random::random_identifier_from(self.entropy.as_ref(), len)
    }

    // =========================================================================
    // Full Resolution
    // =========================================================================

    /// Run every lookup for `claim` under `storage_class` and return the plan.
    ///
    /// An `objectStoreNamespace` parameter overrides the operator namespace.
    /// An `endpoint` parameter skips the service lookup.
    pub async fn resolve(
        &self,
        storage_class: &StorageClass,
        claim: &ObjectBucketClaim,
    ) -> Result<BucketPlan> {
        let span = info_span!(
            parent: &self.span,
            "resolve",
            storage_class = %storage_class.metadata.name.as_deref().unwrap_or("unknown"),
            claim = %claim.name(),
        );
        self.resolve_inner(storage_class, claim).instrument(span).await
    }

    async fn resolve_inner(
        &self,
        storage_class: &StorageClass,
        claim: &ObjectBucketClaim,
    ) -> Result<BucketPlan> {
        let params = StorageClassParams::from_storage_class(storage_class);
        let namespace = if params.object_store_namespace.is_empty() {
            self.config.operator_namespace.clone()
        } else {
            params.object_store_namespace.clone()
        };

        let cluster =
            cluster::locate_cluster(self.clusters.as_ref(), &namespace, self.config.cluster_policy)
                .await?;
        let store =
            store::locate_store(self.stores.as_ref(), &namespace, &params.object_store_name).await?;

        let address = match params.endpoint_override() {
            Some(value) => endpoint::parse_endpoint_override(value)?,
            None => {
                let service =
                    endpoint::resolve_endpoint(self.services.as_ref(), &namespace, &store.service_name())
                        .await?;
                endpoint::endpoint_address(&service, &store)?
            }
        };

        let bucket = bucket::bucket_source(&params, claim, self.entropy.as_ref())?;
        let quota = QuotaOptions::from_claim(claim);
        let ceph_user = bucket::generate_ceph_user(&self.config, self.entropy.as_ref())?;

        info!(
            cluster = %cluster.name(),
            store = %store.name(),
            endpoint = %address,
            bucket = %bucket.name(),
            static_bucket = bucket.is_static(),
            "Resolved bucket claim"
        );

        let EndpointAddress { host, port } = address;
        Ok(BucketPlan {
            cluster: cluster.name().to_string(),
            object_store: store.name().to_string(),
            object_store_namespace: namespace,
            bucket_host: host,
            bucket_port: port,
            bucket,
            quota,
            ceph_user,
            resolved_at: Utc::now(),
        })
    }
}
