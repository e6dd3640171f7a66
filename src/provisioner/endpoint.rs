//! RGW endpoint resolution
//!
//! Each object store is fronted by a Service. The bucket host handed to
//! applications is that service's cluster DNS name plus the gateway port.

use crate::crd::CephObjectStore;
use crate::domain::ports::ServiceRegistry;
use crate::error::{is_kube_not_found, Error, Result};
use k8s_openapi::api::core::v1::Service;
use tracing::debug;

/// Fetch the service `name` in `namespace`.
///
/// Same error split as the store lookup: 404 is
/// [`Error::ServiceNotFound`], everything else [`Error::ServiceFetch`].
pub async fn resolve_endpoint(
    registry: &dyn ServiceRegistry,
    namespace: &str,
    name: &str,
) -> Result<Service> {
    match registry.get_service(namespace, name).await {
        Ok(service) => {
            debug!(namespace = %namespace, service = %name, "Found object store service");
            Ok(service)
        }
        Err(source) if is_kube_not_found(&source) => Err(Error::ServiceNotFound {
            namespace: namespace.to_string(),
            name: name.to_string(),
            source,
        }),
        Err(source) => Err(Error::ServiceFetch {
            namespace: namespace.to_string(),
            name: name.to_string(),
            source,
        }),
    }
}

/// Network address of a bucket endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointAddress {
    pub host: String,
    pub port: i32,
}

impl std::fmt::Display for EndpointAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Derive `<svc>.<ns>.svc:<port>` for a store's service.
///
/// The port comes from the store's gateway spec, falling back to the
/// service's first port.
pub fn endpoint_address(service: &Service, store: &CephObjectStore) -> Result<EndpointAddress> {
    let name = service.metadata.name.clone().unwrap_or_default();
    let namespace = service.metadata.namespace.clone().unwrap_or_default();

    let port = store.gateway_port().or_else(|| {
        service
            .spec
            .as_ref()
            .and_then(|spec| spec.ports.as_ref())
            .and_then(|ports| ports.first())
            .map(|p| p.port)
    });

    match port {
        Some(port) => Ok(EndpointAddress {
            host: format!("{}.{}.svc", name, namespace),
            port,
        }),
        None => Err(Error::ServiceWithoutPort { namespace, name }),
    }
}

/// Parse an `endpoint` override of the form `[scheme://]host[:port][/path]`.
///
/// Without an explicit port, `https` uses 443 and anything else 80. A path
/// suffix is ignored.
pub fn parse_endpoint_override(value: &str) -> Result<EndpointAddress> {
    let value = value.trim();
    let (default_port, rest) = if let Some(rest) = value.strip_prefix("https://") {
        (443, rest)
    } else if let Some(rest) = value.strip_prefix("http://") {
        (80, rest)
    } else {
        (80, value)
    };

    let authority = rest.split('/').next().unwrap_or_default();

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => {
            let port = port.parse::<i32>().map_err(|e| {
                Error::Configuration(format!("Invalid endpoint port in {:?}: {}", value, e))
            })?;
            (host, port)
        }
        None => (authority, default_port),
    };

    if host.is_empty() {
        return Err(Error::Configuration(format!(
            "Endpoint override {:?} has no host",
            value
        )));
    }

    Ok(EndpointAddress {
        host: host.to_string(),
        port,
    })
}

#[cfg(test)]
pub(crate) fn rgw_service(namespace: &str, name: &str, ports: &[i32]) -> Service {
    use k8s_openapi::api::core::v1::{ServicePort, ServiceSpec};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    Service {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            ports: Some(
                ports
                    .iter()
                    .map(|p| ServicePort {
                        port: *p,
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }),
        status: None,
    }
}
