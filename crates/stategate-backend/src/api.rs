//! The backend contract the REST layer is built against.

use async_trait::async_trait;

use crate::error::BackendResult;
use crate::op::PendingMutation;
use crate::types::{NodeStateDoc, StateMutationRequest};

/// Cluster-state authority as seen from the REST layer.
///
/// The real implementation is the leader-elected controller; tests and the
/// standalone daemon use [`MemoryBackend`](crate::MemoryBackend). Every
/// method may fail with any [`StateApiError`](crate::StateApiError) kind —
/// notably `NotMaster` when this instance is not authoritative.
#[async_trait]
pub trait StateBackend: Send + Sync {
    /// Cluster identifiers in backend iteration order.
    async fn list_clusters(&self) -> BackendResult<Vec<String>>;

    /// Node identifiers of one cluster in backend iteration order.
    async fn list_nodes(&self, cluster: &str) -> BackendResult<Vec<String>>;

    /// Full state document of one node.
    async fn node_state(&self, cluster: &str, node: &str) -> BackendResult<NodeStateDoc>;

    /// Request a state change. The returned operation resolves once the
    /// backend has acknowledged the mutation according to the request's
    /// `response_wait` policy.
    async fn set_node_state(
        &self,
        cluster: &str,
        node: &str,
        request: StateMutationRequest,
    ) -> BackendResult<PendingMutation>;
}
