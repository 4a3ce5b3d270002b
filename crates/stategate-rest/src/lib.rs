//! stategate-rest — cluster-state REST protocol layer.
//!
//! Turns an HTTP path + verb + JSON body into reads of the hierarchical
//! cluster/node resource tree (with optional recursive expansion) or
//! conditional state mutations with a caller-selected acknowledgment
//! wait policy, handling not-master redirection and the full error
//! taxonomy along the way. Transport is axum; the cluster-state
//! authority is an injected [`StateBackend`].
//!
//! # API Routes
//!
//! With the default prefix `/cluster/v2`:
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/cluster/v2` | List clusters (`recursive` option) |
//! | GET | `/cluster/v2/{cluster}` | List a cluster's nodes (`recursive` option) |
//! | GET | `/cluster/v2/{cluster}/{node}` | Full node state document |
//! | POST | `/cluster/v2/{cluster}/{node}` | Change a node's current state |

pub mod dispatch;
pub mod error;
pub mod mutation;
pub mod query;
pub mod redirect;
pub mod render;
pub mod resource;

use std::sync::Arc;

use axum::routing::any;
use axum::Router;
use thiserror::Error;

use stategate_backend::StateBackend;

use crate::dispatch::ApiState;

pub use crate::error::{map_error, MappedError};
pub use crate::render::Recursion;
pub use crate::resource::ResourcePath;

/// Setup-time configuration failures. Fatal: no request is served.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("path prefix '{prefix}' must start with '/'")]
    PrefixMissingSlash { prefix: String },
}

/// The protocol layer, bound to a backend and a path prefix.
pub struct RestApi {
    backend: Arc<dyn StateBackend>,
    prefix: String,
}

impl std::fmt::Debug for RestApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestApi")
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl RestApi {
    /// Validate configuration and bind the backend.
    pub fn new(
        backend: Arc<dyn StateBackend>,
        prefix: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        if !prefix.starts_with('/') {
            return Err(ConfigError::PrefixMissingSlash { prefix });
        }
        Ok(Self { backend, prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Build the axum router serving the API under the configured prefix.
    pub fn into_router(self) -> Router {
        let state = ApiState {
            backend: self.backend,
            prefix: self.prefix,
        };
        let root = state.prefix.clone();
        // Trailing-slash and suffixed paths are distinct routes in axum;
        // all three funnel into the same dispatcher.
        Router::new()
            .route(&root, any(dispatch::dispatch))
            .route(&format!("{root}/"), any(dispatch::dispatch))
            .route(&format!("{root}/{{*suffix}}"), any(dispatch::dispatch))
            .with_state(state)
    }
}

/// Convenience: validate the prefix and build the router in one step.
pub fn build_router(
    backend: Arc<dyn StateBackend>,
    prefix: impl Into<String>,
) -> Result<Router, ConfigError> {
    Ok(RestApi::new(backend, prefix)?.into_router())
}
