//! Custom Resource Definitions read by the bucket provisioner
//!
//! - CephCluster / CephObjectStore: the Ceph backend (ceph.rook.io/v1)
//! - ObjectBucket / ObjectBucketClaim: bucket requests and records (objectbucket.io/v1alpha1)

pub mod ceph;
pub mod object_bucket;

pub use ceph::*;
pub use object_bucket::*;
