//! stategated — the cluster-state REST gateway daemon.
//!
//! Serves the cluster-state REST API backed by an in-memory backend,
//! optionally seeded from a JSON file. Standalone mode exists for
//! development and protocol testing; in production the REST layer is
//! embedded next to the real controller.
//!
//! # Usage
//!
//! ```text
//! stategated serve --port 8480 --prefix /cluster/v2 --seed cluster.json
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

use stategate_backend::{MemoryBackend, NodeSpec};

#[derive(Parser)]
#[command(name = "stategated", about = "Cluster-state REST gateway daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the REST API over an in-memory backend.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "8480")]
        port: u16,

        /// Path prefix the API is mounted under. Must start with '/'.
        #[arg(long, default_value = "/cluster/v2")]
        prefix: String,

        /// JSON file describing clusters and nodes to seed.
        #[arg(long)]
        seed: Option<PathBuf>,
    },
}

/// Seed file shape: `{"clusters": [{"name", "nodes": [...]}]}`.
#[derive(Deserialize)]
struct SeedFile {
    clusters: Vec<SeedCluster>,
}

#[derive(Deserialize)]
struct SeedCluster {
    name: String,
    #[serde(default)]
    nodes: Vec<SeedNode>,
}

#[derive(Deserialize)]
struct SeedNode {
    name: String,
    state: Option<String>,
    reason: Option<String>,
    #[serde(default)]
    attributes: IndexMap<String, String>,
    #[serde(default)]
    metrics: IndexMap<String, i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,stategated=debug,stategate=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, prefix, seed } => run_serve(port, prefix, seed).await,
    }
}

async fn run_serve(port: u16, prefix: String, seed: Option<PathBuf>) -> anyhow::Result<()> {
    info!("stategated starting");

    let backend = MemoryBackend::new();
    if let Some(path) = seed {
        let counts = seed_backend(&backend, &path)
            .with_context(|| format!("failed to seed backend from {}", path.display()))?;
        info!(path = %path.display(), clusters = counts.0, nodes = counts.1, "backend seeded");
    }

    let router = stategate_rest::build_router(Arc::new(backend), prefix.clone())
        .context("invalid configuration")?;
    info!(%prefix, "REST layer mounted");

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "API server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C handler");
            info!("shutdown signal received");
        })
        .await?;

    info!("stategated stopped");
    Ok(())
}

/// Load a seed file into the backend. Returns (clusters, nodes) counts.
fn seed_backend(backend: &MemoryBackend, path: &Path) -> anyhow::Result<(usize, usize)> {
    let raw = std::fs::read(path)?;
    let seed: SeedFile = serde_json::from_slice(&raw)?;

    let mut nodes = 0;
    let clusters = seed.clusters.len();
    for cluster in seed.clusters {
        backend.add_cluster(cluster.name.clone());
        for node in cluster.nodes {
            let mut spec = NodeSpec::new(node.name);
            if let Some(state) = node.state {
                spec = spec.with_state(state);
            }
            if let Some(reason) = node.reason {
                spec = spec.with_reason(reason);
            }
            for (key, value) in node.attributes {
                spec = spec.with_attribute(key, value);
            }
            for (name, value) in node.metrics {
                spec = spec.with_metric(name, value);
            }
            backend.add_node(cluster.name.clone(), spec);
            nodes += 1;
        }
    }
    Ok((clusters, nodes))
}
