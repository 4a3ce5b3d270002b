//! Recursive resource rendering.
//!
//! Each level either lists its children as `{"link": ...}` stubs or
//! expands them, consuming one unit of remaining depth per level.
//! `recursive=true` expands without limit; an integer gives the depth;
//! absent, `false`, and `0` are equivalent.

use serde_json::{json, Map, Value};
use stategate_backend::{BackendResult, StateApiError, StateBackend};

use crate::resource::ResourcePath;

const RECURSIVE_RULE: &str = "Recursive option must be true, false, 0 or a positive integer";

/// Parsed `recursive` query option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recursion {
    /// Expand every level below this resource.
    All,
    /// Expand this many levels; `Levels(0)` renders links only.
    Levels(u32),
}

impl Recursion {
    /// Parse an explicit option value. Boolean literals are
    /// case-sensitive; integers must be non-negative.
    pub fn parse(value: &str) -> Result<Recursion, StateApiError> {
        match value {
            "true" => Ok(Recursion::All),
            "false" => Ok(Recursion::Levels(0)),
            _ => value
                .parse::<u32>()
                .map(Recursion::Levels)
                .map_err(|_| StateApiError::InvalidOptionValue {
                    option: "recursive".to_string(),
                    value: value.to_string(),
                    detail: RECURSIVE_RULE.to_string(),
                }),
        }
    }

    /// Whether children at this level are expanded rather than linked.
    fn expands(&self) -> bool {
        !matches!(self, Recursion::Levels(0))
    }

    /// Remaining recursion after descending one level.
    fn descend(&self) -> Recursion {
        match self {
            Recursion::All => Recursion::All,
            Recursion::Levels(depth) => Recursion::Levels(depth.saturating_sub(1)),
        }
    }
}

impl Default for Recursion {
    fn default() -> Self {
        Recursion::Levels(0)
    }
}

/// Render a resolved resource to its JSON document.
pub async fn render_resource(
    backend: &dyn StateBackend,
    prefix: &str,
    resource: &ResourcePath,
    recursion: Recursion,
) -> BackendResult<Value> {
    match resource {
        ResourcePath::Root => render_root(backend, prefix, recursion).await,
        ResourcePath::Cluster { cluster } => {
            render_cluster(backend, prefix, cluster, recursion).await
        }
        // Recursion is a no-op on a leaf.
        ResourcePath::Node { cluster, node } => render_node(backend, cluster, node).await,
        ResourcePath::NotFound { path } => Err(StateApiError::NoSuchResource {
            path: path.clone(),
        }),
    }
}

async fn render_root(
    backend: &dyn StateBackend,
    prefix: &str,
    recursion: Recursion,
) -> BackendResult<Value> {
    let mut clusters = Map::new();
    for cluster in backend.list_clusters().await? {
        let entry = if recursion.expands() {
            render_cluster(backend, prefix, &cluster, recursion.descend()).await?
        } else {
            link(prefix, &[&cluster])
        };
        clusters.insert(cluster, entry);
    }
    Ok(json!({ "cluster": clusters }))
}

async fn render_cluster(
    backend: &dyn StateBackend,
    prefix: &str,
    cluster: &str,
    recursion: Recursion,
) -> BackendResult<Value> {
    let mut nodes = Map::new();
    for node in backend.list_nodes(cluster).await? {
        let entry = if recursion.expands() {
            render_node(backend, cluster, &node).await?
        } else {
            link(prefix, &[cluster, &node])
        };
        nodes.insert(node, entry);
    }
    Ok(json!({ "node": nodes }))
}

async fn render_node(
    backend: &dyn StateBackend,
    cluster: &str,
    node: &str,
) -> BackendResult<Value> {
    let doc = backend.node_state(cluster, node).await?;
    Ok(json!({
        "attributes": doc.attributes,
        "state": { "current": { "state": doc.current.state, "reason": doc.current.reason } },
        "metrics": doc.metrics,
    }))
}

fn link(prefix: &str, segments: &[&str]) -> Value {
    json!({ "link": format!("{prefix}/{}", segments.join("/")) })
}
