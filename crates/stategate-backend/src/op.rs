//! Deferred mutation outcome.
//!
//! `set_node_state` returns a [`PendingMutation`] rather than a finished
//! result: the backend resolves it (possibly much later, once the cluster
//! has acknowledged the change) through the matching [`MutationHandle`].
//! The REST layer's single suspension point is awaiting the pending side.

use tokio::sync::oneshot;

use crate::error::{BackendResult, StateApiError};
use crate::types::MutationOutcome;

/// Producer side of a deferred mutation. Held by the backend.
pub struct MutationHandle {
    tx: oneshot::Sender<BackendResult<MutationOutcome>>,
}

impl MutationHandle {
    /// Resolve the operation. Dropping the handle without calling this
    /// surfaces as an internal failure on the awaiting side.
    pub fn complete(self, outcome: BackendResult<MutationOutcome>) {
        let _ = self.tx.send(outcome);
    }
}

/// Consumer side of a deferred mutation. Awaited exactly once.
pub struct PendingMutation {
    rx: oneshot::Receiver<BackendResult<MutationOutcome>>,
}

impl PendingMutation {
    /// Create an unresolved operation and the handle that resolves it.
    pub fn channel() -> (MutationHandle, PendingMutation) {
        let (tx, rx) = oneshot::channel();
        (MutationHandle { tx }, PendingMutation { rx })
    }

    /// An operation that is already resolved. Used by backends that can
    /// acknowledge synchronously.
    pub fn resolved(outcome: BackendResult<MutationOutcome>) -> PendingMutation {
        let (handle, pending) = Self::channel();
        handle.complete(outcome);
        pending
    }

    /// Suspend until the backend resolves the operation.
    pub async fn outcome(self) -> BackendResult<MutationOutcome> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(StateApiError::InternalFailure {
                detail: "mutation operation dropped before completion".to_string(),
            }),
        }
    }
}
