//! Loading StorageClass and ObjectBucketClaim manifests from YAML files

use crate::crd::ObjectBucketClaim;
use crate::error::Result;
use k8s_openapi::api::storage::v1::StorageClass;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)?;
    let value = serde_yaml::from_str(&raw)?;
    debug!(path = %path.display(), "Loaded manifest");
    Ok(value)
}

pub fn load_storage_class(path: impl AsRef<Path>) -> Result<StorageClass> {
    load(path.as_ref())
}

pub fn load_claim(path: impl AsRef<Path>) -> Result<ObjectBucketClaim> {
    load(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::provisioner::{is_static_bucket, object_store_name};
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_storage_class() {
        let file = write(
            r#"
apiVersion: storage.k8s.io/v1
kind: StorageClass
metadata:
  name: rook-ceph-delete-bucket
provisioner: rook-ceph.ceph.rook.io/bucket
reclaimPolicy: Delete
parameters:
  objectStoreName: my-store
  objectStoreNamespace: rook-ceph
"#,
        );

        let sc = load_storage_class(file.path()).unwrap();
        assert_eq!(sc.provisioner, "rook-ceph.ceph.rook.io/bucket");
        assert_eq!(object_store_name(&sc), "my-store");
        assert_eq!(is_static_bucket(&sc), (String::new(), false));
    }

    #[test]
    fn test_load_claim() {
        let file = write(
            r#"
apiVersion: objectbucket.io/v1alpha1
kind: ObjectBucketClaim
metadata:
  name: ceph-bucket
spec:
  bucketName: ceph-bkt
  storageClassName: rook-ceph-bucket
"#,
        );

        let claim = load_claim(file.path()).unwrap();
        assert_eq!(claim.spec.bucket_name.as_deref(), Some("ceph-bkt"));
    }

    #[test]
    fn test_errors() {
        assert_matches!(load_claim("/nonexistent/claim.yaml"), Err(Error::Io(_)));

        let file = write("spec: [not, a, claim");
        assert_matches!(load_claim(file.path()), Err(Error::YamlParse(_)));
    }
}
