//! stategate-backend — the cluster-state authority contract.
//!
//! Defines what the REST protocol layer needs from the controller that
//! owns ground truth about cluster membership and node health: domain
//! types, the closed error taxonomy, the deferred mutation primitive,
//! and the [`StateBackend`] trait. Also ships [`MemoryBackend`], an
//! insertion-ordered in-memory implementation for tests and standalone
//! operation.
//!
//! # Architecture
//!
//! - **`types`** — clusters, nodes, unit states, mutation requests/outcomes
//! - **`error`** — [`StateApiError`], one variant per failure kind
//! - **`op`** — [`PendingMutation`]/[`MutationHandle`], the asynchronous
//!   acknowledgment boundary
//! - **`api`** — the [`StateBackend`] trait
//! - **`memory`** — [`MemoryBackend`] + [`NodeSpec`] seeding

pub mod api;
pub mod error;
pub mod memory;
pub mod op;
pub mod types;

pub use api::StateBackend;
pub use error::{BackendResult, StateApiError};
pub use memory::{MemoryBackend, NodeSpec};
pub use op::{MutationHandle, PendingMutation};
pub use types::*;
