//! Domain types for the cluster-state protocol.
//!
//! Clusters own insertion-ordered sets of nodes; a node's only mutable
//! field at this layer is its current unit state. Attribute and metric
//! maps use `IndexMap` so rendered JSON follows backend iteration order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Unique identifier for a cluster. Opaque, compared byte-for-byte.
pub type ClusterId = String;

/// Unique identifier for a node within its cluster.
pub type NodeId = String;

/// Health/availability label of a node plus a free-text reason.
///
/// The state is an open string set (`up`, `down`, `initializing`,
/// `retired`, `maintenance`, ...) owned by the backend; this layer never
/// enumerates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitState {
    pub state: String,
    pub reason: String,
}

impl UnitState {
    pub fn new(state: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            reason: reason.into(),
        }
    }
}

impl Default for UnitState {
    fn default() -> Self {
        Self {
            state: "up".to_string(),
            reason: String::new(),
        }
    }
}

/// Full observable state of one node: attributes, current unit state,
/// and numeric metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NodeStateDoc {
    pub attributes: IndexMap<String, String>,
    pub current: UnitState,
    pub metrics: IndexMap<String, i64>,
}

/// Mutation safety mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Condition {
    /// Apply unconditionally.
    #[default]
    Force,
    /// Apply only if the backend judges the transition cluster-safe.
    Safe,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Force => "FORCE",
            Condition::Safe => "SAFE",
        }
    }
}

/// How long the caller wants the coordinator to await acknowledgment
/// before the HTTP response is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseWait {
    /// Suspend until the mutation is durably applied and visible.
    #[default]
    WaitUntilClusterAcked,
    /// The backend may resolve as soon as the change is queued locally.
    NoWait,
}

impl ResponseWait {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseWait::WaitUntilClusterAcked => "wait-until-cluster-acked",
            ResponseWait::NoWait => "no-wait",
        }
    }
}

/// A validated request to change one node's current state.
///
/// Constructed per request by the REST layer and discarded after the
/// backend call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMutationRequest {
    pub new_state: UnitState,
    pub condition: Condition,
    pub response_wait: ResponseWait,
}

/// Outcome of a state mutation, serialized verbatim as the response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    pub was_modified: bool,
    pub reason: String,
}
