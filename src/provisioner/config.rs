//! Resolver configuration

use serde::{Deserialize, Serialize};

/// Default namespace the operator and its CephCluster live in
pub const DEFAULT_OPERATOR_NAMESPACE: &str = "rook-ceph";

/// Length of the random suffix on generated ceph user names
pub const GEN_USER_LEN: usize = 8;

/// Suffix of the provisioner name bucket storage classes point at
pub const PROVISIONER_SUFFIX: &str = "ceph.rook.io/bucket";

/// What to do when a namespace holds more than one CephCluster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClusterPolicy {
    /// Take the first cluster in listing order and log a warning
    #[default]
    FirstEntry,
    /// Fail with an ambiguity error
    RequireSingle,
}

/// Configuration for the bucket resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Namespace whose CephCluster backs the provisioner
    pub operator_namespace: String,
    /// Random suffix length of generated ceph users
    pub user_name_length: usize,
    /// Prefix of generated ceph users
    pub user_name_prefix: String,
    /// Handling of multiple clusters per namespace
    pub cluster_policy: ClusterPolicy,
    /// Optional prefix replacing the namespace in the provisioner name
    pub provisioner_prefix: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            operator_namespace: DEFAULT_OPERATOR_NAMESPACE.to_string(),
            user_name_length: GEN_USER_LEN,
            user_name_prefix: "ceph-user".to_string(),
            cluster_policy: ClusterPolicy::FirstEntry,
            provisioner_prefix: None,
        }
    }
}

impl ResolverConfig {
    /// Name the bucket provisioner registers under, e.g. `rook-ceph.ceph.rook.io/bucket`
    pub fn provisioner_name(&self) -> String {
        let prefix = self
            .provisioner_prefix
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.operator_namespace);
        format!("{}.{}", prefix, PROVISIONER_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ResolverConfig::default();
        assert_eq!(config.operator_namespace, "rook-ceph");
        assert_eq!(config.user_name_length, 8);
        assert_eq!(config.cluster_policy, ClusterPolicy::FirstEntry);
    }

    #[test]
    fn test_provisioner_name() {
        let mut config = ResolverConfig::default();
        assert_eq!(config.provisioner_name(), "rook-ceph.ceph.rook.io/bucket");

        config.provisioner_prefix = Some("custom".into());
        assert_eq!(config.provisioner_name(), "custom.ceph.rook.io/bucket");

        config.provisioner_prefix = Some(String::new());
        assert_eq!(config.provisioner_name(), "rook-ceph.ceph.rook.io/bucket");
    }
}
