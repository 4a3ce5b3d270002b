//! In-memory cluster-state backend.
//!
//! Holds insertion-ordered clusters and nodes behind a mutex, applies
//! mutations synchronously, and resolves every pending operation
//! immediately. Used by tests and by `stategated` in standalone mode.
//!
//! `induce_error` arms a one-shot failure: the next backend call returns
//! the armed error instead of its normal result. Tests use this to drive
//! each taxonomy kind through the full HTTP pipeline.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::api::StateBackend;
use crate::error::{BackendResult, StateApiError};
use crate::op::PendingMutation;
use crate::types::{MutationOutcome, NodeStateDoc, StateMutationRequest};

/// Seed description of one node, built up fluently.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    name: String,
    doc: NodeStateDoc,
}

impl NodeSpec {
    /// A node in the default state (`up`, empty reason, `doc-count` 0).
    pub fn new(name: impl Into<String>) -> Self {
        let mut doc = NodeStateDoc::default();
        doc.metrics.insert("doc-count".to_string(), 0);
        Self {
            name: name.into(),
            doc,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.doc.current.state = state.into();
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.doc.current.reason = reason.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.doc.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: i64) -> Self {
        self.doc.metrics.insert(name.into(), value);
        self
    }

    pub fn with_doc_count(self, count: i64) -> Self {
        self.with_metric("doc-count", count)
    }
}

struct Inner {
    clusters: IndexMap<String, IndexMap<String, NodeStateDoc>>,
    induced: Option<StateApiError>,
}

/// In-memory implementation of [`StateBackend`].
///
/// `Clone` + `Send` + `Sync` (backed by `Arc<Mutex<..>>`) and shareable
/// across async tasks.
#[derive(Clone)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                clusters: IndexMap::new(),
                induced: None,
            })),
        }
    }

    /// Register a cluster. No-op if it already exists.
    pub fn add_cluster(&self, name: impl Into<String>) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        inner.clusters.entry(name.into()).or_default();
        self
    }

    /// Register a node in a cluster, creating the cluster if needed.
    pub fn add_node(&self, cluster: impl Into<String>, node: NodeSpec) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        inner
            .clusters
            .entry(cluster.into())
            .or_default()
            .insert(node.name, node.doc);
        self
    }

    /// Arm a one-shot failure: the next backend call fails with `err`.
    pub fn induce_error(&self, err: StateApiError) {
        self.inner.lock().unwrap().induced = Some(err);
    }
}

fn take_induced(inner: &mut Inner) -> BackendResult<()> {
    match inner.induced.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateBackend for MemoryBackend {
    async fn list_clusters(&self) -> BackendResult<Vec<String>> {
        let mut inner = self.inner.lock().unwrap();
        take_induced(&mut inner)?;
        Ok(inner.clusters.keys().cloned().collect())
    }

    async fn list_nodes(&self, cluster: &str) -> BackendResult<Vec<String>> {
        let mut inner = self.inner.lock().unwrap();
        take_induced(&mut inner)?;
        let nodes = inner
            .clusters
            .get(cluster)
            .ok_or_else(|| StateApiError::NoSuchResource {
                path: cluster.to_string(),
            })?;
        Ok(nodes.keys().cloned().collect())
    }

    async fn node_state(&self, cluster: &str, node: &str) -> BackendResult<NodeStateDoc> {
        let mut inner = self.inner.lock().unwrap();
        take_induced(&mut inner)?;
        lookup(&inner, cluster, node).cloned()
    }

    async fn set_node_state(
        &self,
        cluster: &str,
        node: &str,
        request: StateMutationRequest,
    ) -> BackendResult<PendingMutation> {
        let mut inner = self.inner.lock().unwrap();
        if let Err(err) = take_induced(&mut inner) {
            return Ok(PendingMutation::resolved(Err(err)));
        }
        let doc = lookup_mut(&mut inner, cluster, node)?;
        let was_modified = doc.current != request.new_state;
        doc.current = request.new_state;
        info!(
            %cluster,
            %node,
            state = %doc.current.state,
            condition = request.condition.as_str(),
            "node state updated"
        );
        debug!(wait = request.response_wait.as_str(), "mutation acknowledged");
        Ok(PendingMutation::resolved(Ok(MutationOutcome {
            was_modified,
            reason: format!("MemoryBackend {} call", request.response_wait.as_str()),
        })))
    }
}

fn lookup<'a>(inner: &'a Inner, cluster: &str, node: &str) -> BackendResult<&'a NodeStateDoc> {
    inner
        .clusters
        .get(cluster)
        .and_then(|nodes| nodes.get(node))
        .ok_or_else(|| missing_node(cluster, node))
}

fn lookup_mut<'a>(
    inner: &'a mut Inner,
    cluster: &str,
    node: &str,
) -> BackendResult<&'a mut NodeStateDoc> {
    inner
        .clusters
        .get_mut(cluster)
        .and_then(|nodes| nodes.get_mut(node))
        .ok_or_else(|| missing_node(cluster, node))
}

fn missing_node(cluster: &str, node: &str) -> StateApiError {
    StateApiError::NoSuchResource {
        path: format!("{cluster}/{node}"),
    }
}
