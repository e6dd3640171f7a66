//! Bucket provisioning resolution
//!
//! Turns a StorageClass and an ObjectBucketClaim into the Ceph resources and
//! names needed to create a bucket:
//! - `params`: storage class parameters
//! - `cluster`, `store`, `endpoint`: lookups against the API server
//! - `bucket`: bucket name, quota and credential key reads
//! - `random`: random identifiers
//! - `resolver`: the full flow

pub mod bucket;
pub mod cluster;
pub mod config;
pub mod endpoint;
pub mod params;
pub mod random;
pub mod resolver;
pub mod store;

pub use bucket::{
    bucket_source, credential_key, effective_bucket_name, generate_ceph_user, quota,
    BucketSource, QuotaOptions,
};
pub use cluster::{locate_cluster, lookup_cluster, ClusterLookup};
pub use config::{ClusterPolicy, ResolverConfig};
pub use endpoint::{endpoint_address, parse_endpoint_override, resolve_endpoint, EndpointAddress};
pub use params::{
    is_static_bucket, object_store_endpoint, object_store_name, object_store_namespace,
    StorageClassParams,
};
pub use random::{random_identifier, random_identifier_from};
pub use resolver::{BucketPlan, BucketResolver};
pub use store::locate_store;
