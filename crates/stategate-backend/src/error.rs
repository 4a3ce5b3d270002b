//! Error taxonomy for cluster-state backend operations.
//!
//! Every failure a backend (or the protocol layer's own validation) can
//! produce is one of these kinds. The REST layer maps each kind to an
//! HTTP status, reason, and JSON error body; `Other` is the only
//! catch-all and carries the failure's kind name and detail verbatim.

use thiserror::Error;

/// Result type alias for backend operations.
pub type BackendResult<T> = Result<T, StateApiError>;

/// Failure kinds for cluster-state reads and mutations.
///
/// The `Display` text of each variant is exactly the message the REST
/// layer puts in the JSON error envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateApiError {
    /// No controller instance currently holds mastership.
    #[error("No known master cluster controller currently exists.")]
    UnknownMaster,

    /// Another controller instance is master; callers should retry there.
    #[error("Cluster controller not master. Use master at {host}:{port}.")]
    NotMaster { host: String, port: u16 },

    /// The addressed cluster or node does not exist. `path` is the
    /// unresolved suffix, segments joined by `/`.
    #[error("No such resource '{path}'.")]
    NoSuchResource { path: String },

    /// The request body was malformed or failed schema validation.
    #[error("{detail}")]
    InvalidContent { detail: String },

    /// A URL option carried a value outside its accepted set.
    #[error("Option '{option}' have invalid value '{value}': {detail}")]
    InvalidOptionValue {
        option: String,
        value: String,
        detail: String,
    },

    /// The verb/resource combination has no meaning for this unit.
    #[error("[{path}]: {detail}")]
    OperationNotSupported { path: String, detail: String },

    /// The awaited backend operation missed its deadline.
    #[error("{detail}")]
    DeadlineExceeded { detail: String },

    /// A broken internal invariant.
    #[error("Internal failure. Should not happen: {detail}")]
    InternalFailure { detail: String },

    /// Uncategorized failure; `kind` names the underlying error type.
    #[error("{kind}: {detail}")]
    Other { kind: String, detail: String },
}
