//! Error types for the Ceph bucket provisioner
//!
//! Every lookup failure is classified as either [`ErrorKind::NotFound`] (the
//! target resource is absent) or [`ErrorKind::Other`] (permission, network,
//! timeouts, ...). Backend causes are kept as the error source.

use std::time::Duration;
use thiserror::Error;

/// Unified error type for the provisioner
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read random bytes: {0}")]
    Entropy(#[from] rand::Error),

    // =========================================================================
    // Kubernetes Errors
    // =========================================================================
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    // =========================================================================
    // Ceph Cluster Errors
    // =========================================================================
    #[error("Failed to find ceph cluster in namespace {namespace:?}")]
    ClusterNotFound { namespace: String },

    #[error("Found {count} ceph clusters in namespace {namespace:?}, expected exactly one")]
    AmbiguousCluster { namespace: String, count: usize },

    #[error("Failed to list ceph clusters in namespace {namespace:?}")]
    ClusterList {
        namespace: String,
        #[source]
        source: kube::Error,
    },

    // =========================================================================
    // Object Store Errors
    // =========================================================================
    #[error("CephObjectStore {namespace}/{name} not found")]
    ObjectStoreNotFound {
        namespace: String,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("Failed to get ceph object store {name:?} in namespace {namespace:?}")]
    ObjectStoreFetch {
        namespace: String,
        name: String,
        #[source]
        source: kube::Error,
    },

    // =========================================================================
    // Endpoint Service Errors
    // =========================================================================
    #[error("CephObjectStore service {namespace}/{name} not found")]
    ServiceNotFound {
        namespace: String,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("Failed to get ceph object store service {name:?} in namespace {namespace:?}")]
    ServiceFetch {
        namespace: String,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("Service {namespace}/{name} exposes no port")]
    ServiceWithoutPort { namespace: String, name: String },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The target resource does not exist
    NotFound,
    /// Any other failure
    Other,
}

/// Action the outer reconciliation loop should take on error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// Requeue with exponential backoff
    RequeueWithBackoff,
    /// Requeue after specific duration
    RequeueAfter(Duration),
    /// Don't requeue, wait for changes
    NoRequeue,
}

/// Returns true when a kube error is the API server's 404 response
pub fn is_kube_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(ae) if ae.code == 404)
}

impl Error {
    /// Classify this error as NotFound or Other
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ClusterNotFound { .. }
            | Error::ObjectStoreNotFound { .. }
            | Error::ServiceNotFound { .. } => ErrorKind::NotFound,
            Error::Kube(e) if is_kube_not_found(e) => ErrorKind::NotFound,
            _ => ErrorKind::Other,
        }
    }

    /// Check if the target resource was absent
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Determine what action the caller should take for this error
    pub fn action(&self) -> ErrorAction {
        match self {
            // Missing resources may show up once their own operator catches up
            Error::ClusterNotFound { .. }
            | Error::ObjectStoreNotFound { .. }
            | Error::ServiceNotFound { .. } => ErrorAction::RequeueAfter(Duration::from_secs(30)),

            // Fix requires a change to the declared objects
            Error::Configuration(_)
            | Error::AmbiguousCluster { .. }
            | Error::ServiceWithoutPort { .. }
            | Error::YamlParse(_)
            | Error::JsonParse(_) => ErrorAction::NoRequeue,

            _ => ErrorAction::RequeueWithBackoff,
        }
    }

    /// Check if this error is retryable by the outer loop
    pub fn is_retryable(&self) -> bool {
        !matches!(self.action(), ErrorAction::NoRequeue)
    }
}

/// Result type alias for the provisioner
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
pub(crate) mod test_support {
    use kube::core::ErrorResponse;

    pub fn api_error(code: u16, reason: &str) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("{} ({})", reason, code),
            reason: reason.to_string(),
            code,
        })
    }

    pub fn not_found() -> kube::Error {
        api_error(404, "NotFound")
    }

    pub fn timeout() -> kube::Error {
        api_error(504, "Timeout")
    }
}
