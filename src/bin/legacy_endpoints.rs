//! Legacy Endpoints - Standalone Binary
//!
//! Prints the DNS endpoints that Services annotated for Mate or Molecule
//! would produce. Services come from a JSON manifest or the live cluster.
//!
//! # Usage
//! ```bash
//! # From a manifest
//! kubectl get svc -A -o json > services.json
//! legacy-endpoints --compatibility mate file --path services.json
//!
//! # From the cluster; --output and --verbose may follow the subcommand
//! legacy-endpoints --compatibility molecule cluster --namespace web --output json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use k8s_openapi::api::core::v1::Service;
use kube::{api::ListParams, Api, Client};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use legacy_dns_compat::{legacy_endpoints_from_services, manifest, CompatibilityMode, Endpoint};

#[derive(Parser, Debug)]
#[command(name = "legacy-endpoints", version, about)]
struct Cli {
    /// Legacy annotation convention to read (mate, molecule)
    #[arg(long, env = "LEGACY_COMPATIBILITY")]
    compatibility: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Read Services from a JSON manifest
    File {
        /// Path to a Service, ServiceList or List document
        #[arg(long)]
        path: PathBuf,
    },

    /// List Services from the current cluster
    Cluster {
        /// Namespace to list (default: all namespaces)
        #[arg(long, env = "LEGACY_NAMESPACE")]
        namespace: Option<String>,

        /// Label selector for Services (e.g., "dns=route53")
        #[arg(long, env = "LEGACY_LABEL_SELECTOR")]
        label_selector: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr, stdout carries the endpoint listing
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mode = CompatibilityMode::from(&cli.compatibility);
    if mode == CompatibilityMode::Unrecognized {
        warn!(
            compatibility = %cli.compatibility,
            "Unrecognized compatibility mode, no endpoints will be produced"
        );
    }

    // Load the Service snapshots
    let services = match &cli.command {
        Commands::File { path } => manifest::services_from_path(path)
            .with_context(|| format!("Failed to load Services from {}", path.display()))?,
        Commands::Cluster {
            namespace,
            label_selector,
        } => list_services(namespace.as_deref(), label_selector.as_deref()).await?,
    };

    info!(count = services.len(), mode = %mode, "Loaded Services");

    let endpoints = legacy_endpoints_from_services(&services, mode);

    info!(count = endpoints.len(), "Derived legacy endpoints");

    match cli.output {
        OutputFormat::Table => print!("{}", format_table(&endpoints)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&endpoints)
                .context("Failed to serialize endpoints")?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// List Services through the default kube client
async fn list_services(
    namespace: Option<&str>,
    label_selector: Option<&str>,
) -> Result<Vec<Service>> {
    let client = Client::try_default()
        .await
        .context("Failed to create K8s client")?;

    // No namespace means every namespace
    let api: Api<Service> = match namespace {
        Some(ns) => Api::namespaced(client, ns),
        None => Api::all(client),
    };

    let mut params = ListParams::default();
    if let Some(selector) = label_selector {
        params = params.labels(selector);
    }

    let services = api
        .list(&params)
        .await
        .context("Failed to list Services")?;

    Ok(services.items)
}

fn format_table(endpoints: &[Endpoint]) -> String {
    let mut table = format!("{:<6} {:<40} {}\n", "TYPE", "NAME", "TARGET");
    table.push_str(&"-".repeat(88));
    table.push('\n');

    for endpoint in endpoints {
        table.push_str(&format!(
            "{:<6} {:<40} {}\n",
            endpoint.record_type.to_string(),
            endpoint.dns_name,
            endpoint.target
        ));
    }

    table
}
