//! CephObjectStore lookup

use crate::crd::CephObjectStore;
use crate::domain::ports::StoreRegistry;
use crate::error::{is_kube_not_found, Error, Result};
use tracing::debug;

/// Fetch the object store `name` in `namespace`.
///
/// A 404 becomes [`Error::ObjectStoreNotFound`]; any other failure becomes
/// [`Error::ObjectStoreFetch`]. The backend error is kept as the source.
pub async fn locate_store(
    registry: &dyn StoreRegistry,
    namespace: &str,
    name: &str,
) -> Result<CephObjectStore> {
    match registry.get_store(namespace, name).await {
        Ok(store) => {
            debug!(namespace = %namespace, store = %name, "Found ceph object store");
            Ok(store)
        }
        Err(source) if is_kube_not_found(&source) => Err(Error::ObjectStoreNotFound {
            namespace: namespace.to_string(),
            name: name.to_string(),
            source,
        }),
        Err(source) => Err(Error::ObjectStoreFetch {
            namespace: namespace.to_string(),
            name: name.to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRegistry;
    use crate::crd::CephObjectStoreSpec;
    use crate::error::ErrorKind;
    use assert_matches::assert_matches;
    use std::error::Error as _;

    fn registry() -> InMemoryRegistry {
        let mut spec = CephObjectStoreSpec::default();
        spec.gateway.port = Some(80);
        InMemoryRegistry::new().with_store("rook-ceph", CephObjectStore::new("store1", spec))
    }

    #[tokio::test]
    async fn test_existing_store_is_returned_unmodified() {
        let store = locate_store(&registry(), "rook-ceph", "store1").await.unwrap();
        assert_eq!(store.name(), "store1");
        assert_eq!(store.spec.gateway.port, Some(80));
    }

    #[tokio::test]
    async fn test_missing_store_is_not_found() {
        let err = locate_store(&registry(), "rook-ceph", "missing").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_matches!(&err, Error::ObjectStoreNotFound { name, .. } if name == "missing");

        let source = err.source().and_then(|s| s.downcast_ref::<kube::Error>());
        assert!(source.map(is_kube_not_found).unwrap_or(false));
    }

    #[tokio::test]
    async fn test_timeout_is_other() {
        let registry = registry().fail_store("rook-ceph", "store1", 504, "Timeout");
        let err = locate_store(&registry, "rook-ceph", "store1").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Other);
        assert_matches!(&err, Error::ObjectStoreFetch { name, .. } if name == "store1");
        assert!(err.to_string().contains("store1"));
    }

    #[tokio::test]
    async fn test_wrong_namespace_is_not_found() {
        let err = locate_store(&registry(), "other", "store1").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
