//! Bucket identity, quotas and credential keys
//!
//! Everything here is a read of already-fetched objects; nothing is mutated.

use crate::crd::{ObjectBucket, ObjectBucketClaim};
use crate::domain::ports::EntropySource;
use crate::error::Result;
use crate::provisioner::config::ResolverConfig;
use crate::provisioner::params::StorageClassParams;
use crate::provisioner::random::random_identifier_from;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key in `ObjectBucket.spec.additionalState` holding the ceph user
pub const CEPH_USER_KEY: &str = "cephUser";

pub const MAX_OBJECTS_KEY: &str = "maxObjects";
pub const MAX_SIZE_KEY: &str = "maxSize";

// Suffix length for generated bucket names
const GEN_BUCKET_SUFFIX_LEN: usize = 8;

// =============================================================================
// Bucket Identity
// =============================================================================

/// The bucket name recorded on a bound ObjectBucket
pub fn effective_bucket_name(ob: &ObjectBucket) -> &str {
    &ob.spec.endpoint.bucket_name
}

/// Where the bucket a claim ends up with comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "name", rename_all = "camelCase")]
pub enum BucketSource {
    /// Attach to a pre-existing bucket pinned by the storage class
    Static(String),
    /// Create a new bucket under this name
    Generated(String),
}

impl BucketSource {
    pub fn name(&self) -> &str {
        match self {
            BucketSource::Static(name) | BucketSource::Generated(name) => name,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, BucketSource::Static(_))
    }
}

/// Decide the bucket for a claim under a storage class.
///
/// A static class wins over anything on the claim. Otherwise the claim's
/// explicit `bucketName` is used, else `<generateBucketName>-<random>`
/// (lowercased so the result is a valid S3 bucket name).
pub fn bucket_source(
    params: &StorageClassParams,
    claim: &ObjectBucketClaim,
    entropy: &dyn EntropySource,
) -> Result<BucketSource> {
    if let Some(name) = params.static_bucket() {
        return Ok(BucketSource::Static(name.to_string()));
    }

    if let Some(name) = claim.spec.bucket_name.as_deref().filter(|n| !n.is_empty()) {
        return Ok(BucketSource::Generated(name.to_string()));
    }

    let suffix = random_identifier_from(entropy, GEN_BUCKET_SUFFIX_LEN)?.to_lowercase();
    let name = match claim.spec.generate_bucket_name.as_deref() {
        Some(prefix) if !prefix.is_empty() => format!("{}-{}", prefix, suffix),
        _ => suffix,
    };
    Ok(BucketSource::Generated(name))
}

/// Generate a fresh ceph user name, e.g. `ceph-user-4fZq0aBx`
pub fn generate_ceph_user(config: &ResolverConfig, entropy: &dyn EntropySource) -> Result<String> {
    let suffix = random_identifier_from(entropy, config.user_name_length)?;
    Ok(format!("{}-{}", config.user_name_prefix, suffix))
}

// =============================================================================
// Quota
// =============================================================================

/// Quota settings carried in a claim's `additionalConfig`.
///
/// Values are passed through verbatim; the creation layer parses them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaOptions {
    pub max_objects: String,
    pub max_size: String,
}

impl QuotaOptions {
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let read = |key: &str| config.get(key).cloned().unwrap_or_default();
        Self {
            max_objects: read(MAX_OBJECTS_KEY),
            max_size: read(MAX_SIZE_KEY),
        }
    }

    pub fn from_claim(claim: &ObjectBucketClaim) -> Self {
        Self::from_map(&claim.spec.additional_config)
    }

    /// True when neither quota is set
    pub fn is_unlimited(&self) -> bool {
        self.max_objects.is_empty() && self.max_size.is_empty()
    }
}

/// `(maxObjects, maxSize)` from a claim; absent keys are empty strings
pub fn quota(claim: &ObjectBucketClaim) -> (String, String) {
    let QuotaOptions {
        max_objects,
        max_size,
    } = QuotaOptions::from_claim(claim);
    (max_objects, max_size)
}

// =============================================================================
// Credential Key
// =============================================================================

/// The ceph user previously assigned to a bucket, or `""`
pub fn credential_key(ob: &ObjectBucket) -> &str {
    ob.spec
        .additional_state
        .get(CEPH_USER_KEY)
        .map(String::as_str)
        .unwrap_or("")
}
