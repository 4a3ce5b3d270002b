//! Mutation coordination.
//!
//! Validates a set-state request body field by field, forwards the
//! validated request to the backend, and suspends until the backend's
//! deferred operation resolves. Validation happens before any backend
//! call; each failure names the offending field path.

use serde_json::Value;
use stategate_backend::{
    BackendResult, Condition, MutationOutcome, ResponseWait, StateApiError, StateBackend,
    StateMutationRequest, UnitState,
};
use tracing::debug;

/// Parse and validate a set-state body.
pub fn parse_mutation_request(body: &[u8]) -> Result<StateMutationRequest, StateApiError> {
    let root: Value = serde_json::from_slice(body).map_err(|err| invalid(err.to_string()))?;
    let root = root
        .as_object()
        .ok_or_else(|| invalid("Set state requests must contain a state object"))?;

    let state = root
        .get("state")
        .ok_or_else(|| invalid("Set state requests must contain a state object"))?;
    let state = state
        .as_object()
        .ok_or_else(|| invalid("value of state is not a json object"))?;

    let current = state
        .get("current")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid("value of state->current is not a json object"))?;

    let mut new_state = UnitState::default();
    if let Some(value) = current.get("state") {
        new_state.state = value
            .as_str()
            .ok_or_else(|| invalid("value of state->current->state is not a string"))?
            .to_string();
    }
    if let Some(value) = current.get("reason") {
        new_state.reason = value
            .as_str()
            .ok_or_else(|| invalid("value of state->current->reason is not a string"))?
            .to_string();
    }

    let condition = match root.get("condition") {
        None => Condition::default(),
        Some(value) => parse_condition(value)?,
    };
    let response_wait = match root.get("response-wait") {
        None => ResponseWait::default(),
        Some(value) => parse_response_wait(value)?,
    };

    Ok(StateMutationRequest {
        new_state,
        condition,
        response_wait,
    })
}

/// Forward a validated state change and await acknowledgment.
pub async fn coordinate(
    backend: &dyn StateBackend,
    cluster: &str,
    node: &str,
    request: StateMutationRequest,
) -> BackendResult<MutationOutcome> {
    debug!(
        %cluster,
        %node,
        state = %request.new_state.state,
        condition = request.condition.as_str(),
        wait = request.response_wait.as_str(),
        "forwarding state mutation"
    );
    let pending = backend.set_node_state(cluster, node, request).await?;
    // The response must not be produced before this resolves.
    pending.outcome().await
}

fn parse_condition(value: &Value) -> Result<Condition, StateApiError> {
    let text = literal(value);
    match text.to_ascii_lowercase().as_str() {
        "force" => Ok(Condition::Force),
        "safe" => Ok(Condition::Safe),
        _ => Err(invalid(format!(
            "Invalid value for condition: '{text}', expected one of 'force', 'safe'"
        ))),
    }
}

fn parse_response_wait(value: &Value) -> Result<ResponseWait, StateApiError> {
    let text = literal(value);
    match text.as_str() {
        "wait-until-cluster-acked" => Ok(ResponseWait::WaitUntilClusterAcked),
        "no-wait" => Ok(ResponseWait::NoWait),
        _ => Err(invalid(format!(
            "Invalid value for response-wait: '{text}', expected one of 'wait-until-cluster-acked', 'no-wait'"
        ))),
    }
}

/// String content of a JSON value, or its literal rendering for
/// non-strings so error messages can echo it.
fn literal(value: &Value) -> String {
    match value.as_str() {
        Some(text) => text.to_string(),
        None => value.to_string(),
    }
}

fn invalid(detail: impl Into<String>) -> StateApiError {
    StateApiError::InvalidContent {
        detail: detail.into(),
    }
}
