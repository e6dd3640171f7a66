//! ObjectBucket and ObjectBucketClaim CRDs
//!
//! These are owned by the generic bucket provisioning library; the Ceph
//! provisioner only reads them.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// ObjectBucketClaim CRD
// =============================================================================

/// ObjectBucketClaim is a user's request for a bucket.
#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "objectbucket.io",
    version = "v1alpha1",
    kind = "ObjectBucketClaim",
    plural = "objectbucketclaims",
    shortname = "obc",
    printcolumn = r#"{"name": "StorageClass", "type": "string", "jsonPath": ".spec.storageClassName"}"#,
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ObjectBucketClaimSpec {
    #[serde(default)]
    pub storage_class_name: String,

    /// Explicit bucket name
    #[serde(default)]
    pub bucket_name: Option<String>,

    /// Prefix for a generated bucket name
    #[serde(default)]
    pub generate_bucket_name: Option<String>,

    /// Name of the bound ObjectBucket
    #[serde(default)]
    pub object_bucket_name: Option<String>,

    /// Free-form provisioner configuration (quotas)
    #[serde(default)]
    pub additional_config: BTreeMap<String, String>,
}

// =============================================================================
// ObjectBucket CRD
// =============================================================================

/// ObjectBucket records a provisioned bucket bound to a claim.
#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "objectbucket.io",
    version = "v1alpha1",
    kind = "ObjectBucket",
    plural = "objectbuckets",
    shortname = "ob",
    printcolumn = r#"{"name": "StorageClass", "type": "string", "jsonPath": ".spec.storageClassName"}"#,
    printcolumn = r#"{"name": "Bucket", "type": "string", "jsonPath": ".spec.endpoint.bucketName"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ObjectBucketSpec {
    #[serde(default)]
    pub storage_class_name: String,

    #[serde(default)]
    pub reclaim_policy: Option<String>,

    /// Where the bucket lives
    #[serde(default)]
    pub endpoint: BucketEndpoint,

    /// Provisioner-private state persisted across reconciles
    #[serde(default)]
    pub additional_state: BTreeMap<String, String>,
}

/// Connection details of a provisioned bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BucketEndpoint {
    #[serde(default)]
    pub bucket_host: String,

    #[serde(default)]
    pub bucket_port: i32,

    #[serde(default)]
    pub bucket_name: String,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub sub_region: String,

    #[serde(default)]
    pub additional_config: BTreeMap<String, String>,
}

impl ObjectBucketClaim {
    /// Get the name of this claim
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_from_yaml() {
        let yaml = r#"
apiVersion: objectbucket.io/v1alpha1
kind: ObjectBucketClaim
metadata:
  name: photos
  namespace: default
spec:
  storageClassName: rook-ceph-bucket
  generateBucketName: photos
  additionalConfig:
    maxObjects: "1000"
    maxSize: "2G"
"#;
        let claim: ObjectBucketClaim = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(claim.name(), "photos");
        assert_eq!(claim.spec.generate_bucket_name.as_deref(), Some("photos"));
        assert_eq!(claim.spec.additional_config["maxSize"], "2G");
        assert!(claim.spec.bucket_name.is_none());
    }

    #[test]
    fn test_bucket_defaults() {
        let ob: ObjectBucket = serde_json::from_value(serde_json::json!({
            "apiVersion": "objectbucket.io/v1alpha1",
            "kind": "ObjectBucket",
            "metadata": { "name": "obc-default-photos" },
            "spec": { "endpoint": { "bucketName": "photos-abc" } }
        }))
        .unwrap();
        assert_eq!(ob.spec.endpoint.bucket_name, "photos-abc");
        assert!(ob.spec.additional_state.is_empty());
    }
}
