//! Ceph Bucket Provisioner
//!
//! Resolves ObjectBucketClaims into the Ceph resources that serve them:
//! which CephCluster and CephObjectStore back a bucket StorageClass, whether
//! the class pins a pre-existing bucket, how the RGW endpoint is reached, and
//! what quota and ceph user the new bucket gets.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │        Claim reconciler (external, generic OBC library)      │
//! └───────────────────────────────┬──────────────────────────────┘
//!                                 │ StorageClass + ObjectBucketClaim
//! ┌───────────────────────────────┴──────────────────────────────┐
//! │                        BucketResolver                        │
//! │  ┌────────────┐ ┌──────────────┐ ┌────────────┐ ┌─────────┐  │
//! │  │ Parameters │ │ Cluster/Store│ │  Endpoint  │ │ Bucket  │  │
//! │  │            │ │   Locators   │ │  Resolver  │ │ Identity│  │
//! │  └────────────┘ └──────┬───────┘ └─────┬──────┘ └─────────┘  │
//! ├────────────────────────┼───────────────┼─────────────────────┤
//! │                   Registry ports (domain)                    │
//! │        KubeRegistry (live API)  │  InMemoryRegistry          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`provisioner`]: resolution and naming logic
//! - [`adapters`]: Kubernetes, in-memory and entropy adapters
//! - [`crd`]: Custom Resource Definitions
//! - [`domain`]: collaborator traits
//! - [`manifest`]: YAML manifest loading
//! - [`error`]: Error types and handling

pub mod adapters;
pub mod crd;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod provisioner;

// Re-export commonly used types
pub use adapters::{InMemoryRegistry, KubeRegistry, OsEntropy};

pub use crd::{
    CephCluster, CephClusterSpec, CephObjectStore, CephObjectStoreSpec, ObjectBucket,
    ObjectBucketClaim, ObjectBucketClaimSpec, ObjectBucketSpec,
};

pub use domain::ports::{ClusterRegistry, EntropySource, ServiceRegistry, StoreRegistry};

pub use error::{Error, ErrorAction, ErrorKind, Result};

pub use provisioner::{
    BucketPlan, BucketResolver, BucketSource, ClusterLookup, ClusterPolicy, QuotaOptions,
    ResolverConfig, StorageClassParams,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
