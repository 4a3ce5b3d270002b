//! Request dispatch.
//!
//! Single entry point for every request under the configured prefix:
//! parses path, method, and query, validates options and bodies before
//! touching the backend, and funnels every failure through the redirect
//! resolver and the taxonomy mapper. Each request ends in exactly one
//! full response.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{header, request::Parts, Method};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, warn};

use stategate_backend::{StateApiError, StateBackend};

use crate::error::map_error;
use crate::mutation;
use crate::query::{self, QueryPair};
use crate::redirect::master_location;
use crate::render::{render_resource, Recursion};
use crate::resource::ResourcePath;

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 1 << 20;

/// Shared dispatcher state: the injected backend plus read-only config.
#[derive(Clone)]
pub struct ApiState {
    pub backend: Arc<dyn StateBackend>,
    pub prefix: String,
}

/// What the redirect resolver needs from the original request.
struct RequestContext {
    scheme: String,
    path: String,
    query: Vec<QueryPair>,
}

impl RequestContext {
    fn from_parts(parts: &Parts) -> Self {
        let scheme = parts
            .uri
            .scheme_str()
            .map(str::to_string)
            .or_else(|| {
                parts
                    .headers
                    .get("x-forwarded-proto")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "http".to_string());
        Self {
            scheme,
            path: parts.uri.path().to_string(),
            query: query::parse(parts.uri.query().unwrap_or("")),
        }
    }
}

/// Catch-all handler for every path under the prefix.
pub async fn dispatch(State(state): State<ApiState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let ctx = RequestContext::from_parts(&parts);
    debug!(method = %parts.method, path = %ctx.path, "dispatching");
    match handle(&state, &ctx, &parts.method, body).await {
        Ok(response) => response,
        Err(err) => error_response(&ctx, err),
    }
}

async fn handle(
    state: &ApiState,
    ctx: &RequestContext,
    method: &Method,
    body: Body,
) -> Result<Response, StateApiError> {
    let backend = state.backend.as_ref();
    let segments = suffix_segments(&ctx.path, &state.prefix);

    match *method {
        Method::GET => {
            // Option validation precedes any backend call.
            let recursion = match query::option(&ctx.query, "recursive") {
                Some(value) => Recursion::parse(value)?,
                None => Recursion::default(),
            };
            let resource = resolve(backend, &segments).await?;
            let doc = render_resource(backend, &state.prefix, &resource, recursion).await?;
            Ok(Json(doc).into_response())
        }
        Method::POST => {
            let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|err| {
                StateApiError::InvalidContent {
                    detail: format!("could not read request body: {err}"),
                }
            })?;
            // Body validation precedes any backend call.
            let request = mutation::parse_mutation_request(&bytes)?;
            match resolve(backend, &segments).await? {
                ResourcePath::Node { cluster, node } => {
                    let outcome = mutation::coordinate(backend, &cluster, &node, request).await?;
                    Ok(Json(outcome).into_response())
                }
                other => Err(unsupported(&other, method)),
            }
        }
        _ => {
            let resource = resolve(backend, &segments).await?;
            Err(unsupported(&resource, method))
        }
    }
}

/// Check the addressed identifiers against the backend's listings.
async fn resolve(
    backend: &dyn StateBackend,
    segments: &[String],
) -> Result<ResourcePath, StateApiError> {
    let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
    let resource = ResourcePath::resolve(&refs);
    match &resource {
        ResourcePath::Root => {}
        ResourcePath::Cluster { cluster } => {
            let clusters = backend.list_clusters().await?;
            if !clusters.iter().any(|known| known == cluster) {
                return Err(missing(&resource));
            }
        }
        ResourcePath::Node { cluster, node } => {
            let clusters = backend.list_clusters().await?;
            if !clusters.iter().any(|known| known == cluster) {
                return Err(missing(&resource));
            }
            let nodes = backend.list_nodes(cluster).await?;
            if !nodes.iter().any(|known| known == node) {
                return Err(missing(&resource));
            }
        }
        ResourcePath::NotFound { .. } => return Err(missing(&resource)),
    }
    Ok(resource)
}

fn missing(resource: &ResourcePath) -> StateApiError {
    StateApiError::NoSuchResource {
        path: resource.joined(),
    }
}

fn unsupported(resource: &ResourcePath, method: &Method) -> StateApiError {
    let path = match resource {
        ResourcePath::Root => String::new(),
        ResourcePath::Cluster { cluster } => cluster.clone(),
        ResourcePath::Node { cluster, node } => format!("{cluster}, {node}"),
        ResourcePath::NotFound { path } => path.clone(),
    };
    StateApiError::OperationNotSupported {
        path,
        detail: format!("{method} not supported"),
    }
}

fn suffix_segments(path: &str, prefix: &str) -> Vec<String> {
    let suffix = path.strip_prefix(prefix).unwrap_or(path);
    suffix
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render an error, giving the not-master redirect precedence over the
/// plain taxonomy mapping.
fn error_response(ctx: &RequestContext, err: StateApiError) -> Response {
    let mapped = map_error(&err);
    warn!(
        status = mapped.status.as_u16(),
        reason = %mapped.reason,
        "request failed"
    );
    let body = Json(json!({ "message": mapped.message }));
    if let StateApiError::NotMaster { host, port } = &err {
        let location = master_location(&ctx.scheme, host, *port, &ctx.path, &ctx.query);
        return (mapped.status, [(header::LOCATION, location)], body).into_response();
    }
    (mapped.status, body).into_response()
}
