//! Storage class parameters
//!
//! A bucket StorageClass names the object store that serves it and may pin
//! a pre-existing bucket:
//!
//! ```yaml
//! parameters:
//!   objectStoreName: store1
//!   objectStoreNamespace: rook-ceph
//!   bucketName: fixed-bucket   # optional, makes the class "static"
//!   endpoint: s3.example:80    # optional
//! ```

use k8s_openapi::api::storage::v1::StorageClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const OBJECT_STORE_NAME: &str = "objectStoreName";
pub const OBJECT_STORE_NAMESPACE: &str = "objectStoreNamespace";
pub const OBJECT_STORE_ENDPOINT: &str = "endpoint";
pub const STATIC_BUCKET_NAME: &str = "bucketName";

/// Typed view of a bucket StorageClass's parameters.
///
/// Absent string keys read as empty strings. `bucket_name` keeps presence:
/// `Some("")` still marks a static bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageClassParams {
    pub object_store_name: String,
    pub object_store_namespace: String,
    pub endpoint: String,
    pub bucket_name: Option<String>,
}

impl StorageClassParams {
    /// Build from a raw parameter map
    pub fn from_map(params: &BTreeMap<String, String>) -> Self {
        let read = |key: &str| params.get(key).cloned().unwrap_or_default();
        Self {
            object_store_name: read(OBJECT_STORE_NAME),
            object_store_namespace: read(OBJECT_STORE_NAMESPACE),
            endpoint: read(OBJECT_STORE_ENDPOINT),
            bucket_name: params.get(STATIC_BUCKET_NAME).cloned(),
        }
    }

    /// Build from a StorageClass; a class without parameters reads as empty
    pub fn from_storage_class(sc: &StorageClass) -> Self {
        sc.parameters
            .as_ref()
            .map(Self::from_map)
            .unwrap_or_default()
    }

    /// The pinned bucket name, if the class is static
    pub fn static_bucket(&self) -> Option<&str> {
        self.bucket_name.as_deref()
    }

    /// Endpoint override, if set to a non-empty value
    pub fn endpoint_override(&self) -> Option<&str> {
        Some(self.endpoint.as_str()).filter(|e| !e.is_empty())
    }
}

pub fn object_store_name(sc: &StorageClass) -> String {
    StorageClassParams::from_storage_class(sc).object_store_name
}

pub fn object_store_namespace(sc: &StorageClass) -> String {
    StorageClassParams::from_storage_class(sc).object_store_namespace
}

pub fn object_store_endpoint(sc: &StorageClass) -> String {
    StorageClassParams::from_storage_class(sc).endpoint
}

/// Returns the pinned bucket name and whether the key was present at all
pub fn is_static_bucket(sc: &StorageClass) -> (String, bool) {
    match StorageClassParams::from_storage_class(sc).bucket_name {
        Some(name) => (name, true),
        None => (String::new(), false),
    }
}

#[cfg(test)]
pub(crate) fn storage_class(name: &str, params: &[(&str, &str)]) -> StorageClass {
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    StorageClass {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        provisioner: "rook-ceph.ceph.rook.io/bucket".to_string(),
        parameters: Some(
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_identity() {
        let sc = storage_class(
            "bucket-class",
            &[
                ("objectStoreName", "store1"),
                ("objectStoreNamespace", "rook-ceph"),
                ("bucketName", "fixed-bucket"),
            ],
        );
        assert_eq!(object_store_name(&sc), "store1");
        assert_eq!(object_store_namespace(&sc), "rook-ceph");
        assert_eq!(object_store_endpoint(&sc), "");
        assert_eq!(is_static_bucket(&sc), ("fixed-bucket".to_string(), true));
    }

    #[test]
    fn test_absent_keys_are_empty() {
        let sc = storage_class("empty", &[]);
        assert_eq!(object_store_name(&sc), "");
        assert_eq!(object_store_namespace(&sc), "");
        assert_eq!(is_static_bucket(&sc), (String::new(), false));

        let mut sc = sc;
        sc.parameters = None;
        assert_eq!(StorageClassParams::from_storage_class(&sc), StorageClassParams::default());
    }

    #[test]
    fn test_empty_bucket_name_is_still_static() {
        let sc = storage_class("static", &[("bucketName", "")]);
        assert_eq!(is_static_bucket(&sc), (String::new(), true));

        let params = StorageClassParams::from_storage_class(&sc);
        assert_eq!(params.static_bucket(), Some(""));
    }

    #[test]
    fn test_endpoint_override() {
        let sc = storage_class("ep", &[("endpoint", "s3.example.com:443")]);
        let params = StorageClassParams::from_storage_class(&sc);
        assert_eq!(params.endpoint_override(), Some("s3.example.com:443"));

        let params = StorageClassParams::from_map(&BTreeMap::new());
        assert_eq!(params.endpoint_override(), None);
    }
}
