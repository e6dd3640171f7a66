//! CephCluster lookup
//!
//! Rook runs a single CephCluster per namespace. The lookup reports what it
//! actually found; [`locate_cluster`] then applies a [`ClusterPolicy`].

use crate::crd::CephCluster;
use crate::domain::ports::ClusterRegistry;
use crate::error::{Error, Result};
use crate::provisioner::config::ClusterPolicy;
use tracing::{debug, warn};

/// Outcome of listing the clusters in a namespace
#[derive(Debug, Clone)]
pub enum ClusterLookup {
    /// Exactly one cluster
    Found(CephCluster),
    /// No cluster at all
    NotFound,
    /// More than one cluster; `first` is the first in listing order
    Ambiguous { first: CephCluster, count: usize },
}

impl ClusterLookup {
    fn from_items(items: Vec<CephCluster>) -> Self {
        let count = items.len();
        match items.into_iter().next() {
            None => ClusterLookup::NotFound,
            Some(cluster) if count == 1 => ClusterLookup::Found(cluster),
            Some(first) => ClusterLookup::Ambiguous { first, count },
        }
    }

    /// Number of clusters seen
    pub fn count(&self) -> usize {
        match self {
            ClusterLookup::Found(_) => 1,
            ClusterLookup::NotFound => 0,
            ClusterLookup::Ambiguous { count, .. } => *count,
        }
    }
}

/// List the clusters in `namespace` and classify the result
pub async fn lookup_cluster(registry: &dyn ClusterRegistry, namespace: &str) -> Result<ClusterLookup> {
    let items = registry
        .list_clusters(namespace)
        .await
        .map_err(|source| Error::ClusterList {
            namespace: namespace.to_string(),
            source,
        })?;

    debug!(namespace = %namespace, count = items.len(), "Looked up ceph clusters");
    Ok(ClusterLookup::from_items(items))
}

/// Resolve the CephCluster owning `namespace`.
///
/// Zero clusters is always an error. With several clusters,
/// [`ClusterPolicy::FirstEntry`] returns the first in listing order (the
/// API's order, not sorted) while [`ClusterPolicy::RequireSingle`] fails.
pub async fn locate_cluster(
    registry: &dyn ClusterRegistry,
    namespace: &str,
    policy: ClusterPolicy,
) -> Result<CephCluster> {
    match lookup_cluster(registry, namespace).await? {
        ClusterLookup::Found(cluster) => Ok(cluster),
        ClusterLookup::NotFound => Err(Error::ClusterNotFound {
            namespace: namespace.to_string(),
        }),
        ClusterLookup::Ambiguous { first, count } => match policy {
            ClusterPolicy::RequireSingle => Err(Error::AmbiguousCluster {
                namespace: namespace.to_string(),
                count,
            }),
            ClusterPolicy::FirstEntry => {
                warn!(
                    namespace = %namespace,
                    count = count,
                    cluster = %first.name(),
                    "Multiple ceph clusters found, using the first"
                );
                Ok(first)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRegistry;
    use crate::crd::CephClusterSpec;
    use crate::error::ErrorKind;
    use assert_matches::assert_matches;

    fn cluster(name: &str) -> CephCluster {
        CephCluster::new(name, CephClusterSpec::default())
    }

    #[tokio::test]
    async fn test_zero_clusters_is_not_found() {
        let registry = InMemoryRegistry::new();
        let err = locate_cluster(&registry, "rook-ceph", ClusterPolicy::FirstEntry)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_matches!(&err, Error::ClusterNotFound { namespace } if namespace == "rook-ceph");
        assert!(err.to_string().contains("rook-ceph"));
    }

    #[tokio::test]
    async fn test_single_cluster() {
        let registry = InMemoryRegistry::new().with_cluster("rook-ceph", cluster("my-cluster"));

        let found = locate_cluster(&registry, "rook-ceph", ClusterPolicy::RequireSingle)
            .await
            .unwrap();
        assert_eq!(found.name(), "my-cluster");
    }

    #[tokio::test]
    async fn test_two_clusters_returns_first() {
        let registry = InMemoryRegistry::new()
            .with_cluster("rook-ceph", cluster("second-created"))
            .with_cluster("rook-ceph", cluster("a-cluster"));

        let found = locate_cluster(&registry, "rook-ceph", ClusterPolicy::FirstEntry)
            .await
            .unwrap();
        assert_eq!(found.name(), "second-created");
    }

    #[tokio::test]
    async fn test_three_clusters_keep_first_and_count() {
        let registry = InMemoryRegistry::new()
            .with_cluster("rook-ceph", cluster("one"))
            .with_cluster("rook-ceph", cluster("two"))
            .with_cluster("rook-ceph", cluster("three"));

        let lookup = lookup_cluster(&registry, "rook-ceph").await.unwrap();
        assert_matches!(&lookup, ClusterLookup::Ambiguous { first, count: 3 } if first.name() == "one");

        let single = InMemoryRegistry::new().with_cluster("rook-ceph", cluster("only"));
        let lookup = lookup_cluster(&single, "rook-ceph").await.unwrap();
        assert_matches!(&lookup, ClusterLookup::Found(c) if c.name() == "only");
        assert_eq!(lookup.count(), 1);

        let lookup = lookup_cluster(&InMemoryRegistry::new(), "rook-ceph").await.unwrap();
        assert_matches!(lookup, ClusterLookup::NotFound);
    }

    #[tokio::test]
    async fn test_two_clusters_rejected_when_single_required() {
        let registry = InMemoryRegistry::new()
            .with_cluster("rook-ceph", cluster("a"))
            .with_cluster("rook-ceph", cluster("b"));

        let lookup = lookup_cluster(&registry, "rook-ceph").await.unwrap();
        assert_matches!(&lookup, ClusterLookup::Ambiguous { first, count: 2 } if first.name() == "a");
        assert_eq!(lookup.count(), 2);

        let err = locate_cluster(&registry, "rook-ceph", ClusterPolicy::RequireSingle)
            .await
            .unwrap_err();
        assert_matches!(err, Error::AmbiguousCluster { count: 2, .. });
    }

    #[tokio::test]
    async fn test_list_failure_keeps_namespace() {
        let registry = InMemoryRegistry::new().fail_cluster_list("rook-ceph", 403, "Forbidden");

        let err = locate_cluster(&registry, "rook-ceph", ClusterPolicy::FirstEntry)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_matches!(&err, Error::ClusterList { namespace, .. } if namespace == "rook-ceph");
    }
}
