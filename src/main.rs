//! Ceph Bucket Provisioner - dry-run resolver
//!
//! Resolves a bucket StorageClass (and optionally an ObjectBucketClaim)
//! against the live cluster and prints the resulting bucket plan as JSON.
//! Nothing is created.

use clap::Parser;
use k8s_openapi::api::storage::v1::StorageClass;
use kube::api::Api;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ceph_bucket_provisioner::{
    manifest, BucketResolver, ClusterPolicy, Error, KubeRegistry, ObjectBucketClaim,
    ObjectBucketClaimSpec, ResolverConfig, Result,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Ceph Bucket Provisioner - resolve ObjectBucketClaims to Ceph object stores
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of the bucket StorageClass to fetch from the cluster
    #[arg(long, env = "STORAGE_CLASS", conflicts_with = "storage_class_file")]
    storage_class: Option<String>,

    /// Read the StorageClass from a YAML file instead
    #[arg(long)]
    storage_class_file: Option<PathBuf>,

    /// ObjectBucketClaim YAML file; an empty claim is used if omitted
    #[arg(long)]
    claim_file: Option<PathBuf>,

    /// Namespace of the operator and its CephCluster
    #[arg(long, env = "OPERATOR_NAMESPACE", default_value = "rook-ceph")]
    operator_namespace: String,

    /// Prefix replacing the namespace in the provisioner name
    #[arg(long, env = "ROOK_OBC_PROVISIONER_NAME_PREFIX")]
    provisioner_prefix: Option<String>,

    /// Fail instead of picking the first cluster when several exist
    #[arg(long, env = "REQUIRE_SINGLE_CLUSTER")]
    require_single_cluster: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

impl Args {
    fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            operator_namespace: self.operator_namespace.clone(),
            provisioner_prefix: self.provisioner_prefix.clone(),
            cluster_policy: if self.require_single_cluster {
                ClusterPolicy::RequireSingle
            } else {
                ClusterPolicy::FirstEntry
            },
            ..Default::default()
        }
    }
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let config = args.resolver_config();
    info!("Starting Ceph bucket provisioner (dry run)");
    info!("  Version: {}", ceph_bucket_provisioner::VERSION);
    info!("  Provisioner: {}", config.provisioner_name());
    info!("  Operator namespace: {}", config.operator_namespace);

    let registry = Arc::new(KubeRegistry::try_default().await?);

    let storage_class = match (&args.storage_class_file, &args.storage_class) {
        (Some(path), _) => manifest::load_storage_class(path)?,
        (None, Some(name)) => {
            let api: Api<StorageClass> = Api::all(registry.client().clone());
            api.get(name).await?
        }
        (None, None) => {
            return Err(Error::Configuration(
                "one of --storage-class or --storage-class-file is required".to_string(),
            ))
        }
    };

    let claim = match &args.claim_file {
        Some(path) => manifest::load_claim(path)?,
        None => ObjectBucketClaim::new(
            "dry-run",
            ObjectBucketClaimSpec {
                storage_class_name: storage_class.metadata.name.clone().unwrap_or_default(),
                generate_bucket_name: Some("dry-run".to_string()),
                ..Default::default()
            },
        ),
    };

    let resolver = BucketResolver::from_registry(config, registry);
    let plan = resolver.resolve(&storage_class, &claim).await?;

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = ["hyper=warn", "kube=info", "tower=warn"]
        .iter()
        .filter_map(|d| d.parse::<Directive>().ok())
        .fold(
            EnvFilter::from_default_env().add_directive(level.into()),
            |filter, directive| filter.add_directive(directive),
        );

    // Logs go to stderr so stdout carries only the plan
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
