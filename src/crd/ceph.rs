//! Ceph CRDs consumed by the provisioner
//!
//! Only the fields the bucket provisioner reads are modelled; everything
//! else on the live objects is ignored during deserialization.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix of the service rook creates in front of each object store's RGW pods
pub const RGW_SERVICE_PREFIX: &str = "rook-ceph-rgw";

// =============================================================================
// CephCluster CRD
// =============================================================================

/// CephCluster describes the Ceph cluster owning a namespace.
#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "ceph.rook.io",
    version = "v1",
    kind = "CephCluster",
    plural = "cephclusters",
    status = "CephClusterStatus",
    printcolumn = r#"{"name": "DataDirHostPath", "type": "string", "jsonPath": ".spec.dataDirHostPath"}"#,
    printcolumn = r#"{"name": "Phase", "type": "string", "jsonPath": ".status.phase"}"#,
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CephClusterSpec {
    /// Path on the host where daemon data is stored
    #[serde(default)]
    pub data_dir_host_path: Option<String>,

    /// Ceph container image settings
    #[serde(default)]
    pub ceph_version: Option<CephVersionSpec>,
}

/// Ceph container image settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CephVersionSpec {
    #[serde(default)]
    pub image: Option<String>,
}

/// Observed CephCluster state
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CephClusterStatus {
    #[serde(default)]
    pub phase: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// CephObjectStore CRD
// =============================================================================

/// CephObjectStore is an RGW instance serving S3-compatible buckets.
#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "ceph.rook.io",
    version = "v1",
    kind = "CephObjectStore",
    plural = "cephobjectstores",
    status = "CephObjectStoreStatus",
    printcolumn = r#"{"name": "Phase", "type": "string", "jsonPath": ".status.phase"}"#,
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CephObjectStoreSpec {
    /// RGW gateway settings
    #[serde(default)]
    pub gateway: GatewaySpec,
}

/// RGW gateway settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatewaySpec {
    /// Plain HTTP port
    #[serde(default)]
    pub port: Option<i32>,

    /// HTTPS port
    #[serde(default)]
    pub secure_port: Option<i32>,

    /// Number of RGW pods
    #[serde(default)]
    pub instances: Option<i32>,
}

/// Observed CephObjectStore state
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CephObjectStoreStatus {
    #[serde(default)]
    pub phase: Option<String>,

    #[serde(default)]
    pub info: BTreeMap<String, String>,
}

impl CephCluster {
    /// Get the name of this cluster
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }
}

impl CephObjectStore {
    /// Get the name of this object store
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }

    /// Name of the service fronting this store's RGW pods
    pub fn service_name(&self) -> String {
        format!("{}-{}", RGW_SERVICE_PREFIX, self.name())
    }

    /// Port the gateway listens on, preferring plain HTTP
    pub fn gateway_port(&self) -> Option<i32> {
        let gw = &self.spec.gateway;
        gw.port.filter(|p| *p > 0).or(gw.secure_port.filter(|p| *p > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name() {
        let store = CephObjectStore::new("store1", CephObjectStoreSpec::default());
        assert_eq!(store.service_name(), "rook-ceph-rgw-store1");
    }

    #[test]
    fn test_gateway_port() {
        let mut store = CephObjectStore::new("store1", CephObjectStoreSpec::default());
        assert_eq!(store.gateway_port(), None);

        store.spec.gateway.secure_port = Some(443);
        assert_eq!(store.gateway_port(), Some(443));

        store.spec.gateway.port = Some(80);
        assert_eq!(store.gateway_port(), Some(80));
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = serde_json::json!({
            "apiVersion": "ceph.rook.io/v1",
            "kind": "CephObjectStore",
            "metadata": { "name": "store1", "namespace": "rook-ceph" },
            "spec": {
                "gateway": { "port": 80, "instances": 1 },
                "metadataPool": { "replicated": { "size": 3 } }
            }
        });
        let store: CephObjectStore = serde_json::from_value(json).unwrap();
        assert_eq!(store.spec.gateway.port, Some(80));
        assert_eq!(store.name(), "store1");
    }
}
