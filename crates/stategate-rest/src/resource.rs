//! Resource addressing.
//!
//! The exposed tree is static: the root lists clusters, a cluster lists
//! nodes, a node is a leaf. Resolution is purely structural here; whether
//! the addressed identifiers exist is the dispatcher's concern.

/// Result of resolving a path suffix against the resource tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourcePath {
    /// The cluster list at the API root.
    Root,
    /// One cluster.
    Cluster { cluster: String },
    /// One node within a cluster.
    Node { cluster: String, node: String },
    /// A suffix deeper than the tree. `path` is the joined suffix.
    NotFound { path: String },
}

impl ResourcePath {
    /// Resolve already-split, non-empty path segments.
    pub fn resolve(segments: &[&str]) -> ResourcePath {
        match segments {
            [] => ResourcePath::Root,
            [cluster] => ResourcePath::Cluster {
                cluster: (*cluster).to_string(),
            },
            [cluster, node] => ResourcePath::Node {
                cluster: (*cluster).to_string(),
                node: (*node).to_string(),
            },
            more => ResourcePath::NotFound {
                path: more.join("/"),
            },
        }
    }

    /// The suffix this resource was addressed by, segments joined by `/`.
    pub fn joined(&self) -> String {
        match self {
            ResourcePath::Root => String::new(),
            ResourcePath::Cluster { cluster } => cluster.clone(),
            ResourcePath::Node { cluster, node } => format!("{cluster}/{node}"),
            ResourcePath::NotFound { path } => path.clone(),
        }
    }
}
