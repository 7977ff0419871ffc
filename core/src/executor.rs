//! Request executor: one GET, one classified envelope.
//!
//! # Design
//! `parse_response` is the whole normalization contract and is pure.
//! `Executor::execute` only moves the blocking `Transport::send` onto
//! tokio's blocking pool and feeds the result to `parse_response`.
//!
//! Two failure channels stay disjoint: a body with a top-level `error`
//! object becomes `GraphResponse::Failure` whatever the status code, while
//! transport faults and undecodable bodies surface as `Err(GraphError)`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::envelope::{ApiError, GraphResponse, RateLimitInfo};
use crate::error::GraphError;
use crate::http::{HttpRequest, HttpResponse, APP_USAGE_HEADER};
use crate::transport::Transport;

#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}

impl Executor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Issue `request` once and classify the response.
    ///
    /// Requires a running tokio runtime.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<GraphResponse<T>, GraphError> {
        tracing::debug!(route = request.route(), "graph request");
        let transport = Arc::clone(&self.transport);
        let response = tokio::task::spawn_blocking(move || transport.send(&request))
            .await
            .map_err(|e| GraphError::Task(e.to_string()))??;
        parse_response(response)
    }
}

/// Classify a buffered response into the envelope.
pub fn parse_response<T: DeserializeOwned>(
    response: HttpResponse,
) -> Result<GraphResponse<T>, GraphError> {
    let mut body: Value = serde_json::from_str(&response.body)?;

    if let Some(Value::Object(members)) = body.get_mut("error") {
        let error = ApiError::from(std::mem::take(members));
        tracing::debug!(
            status = response.status,
            code = error.code,
            kind = %error.kind,
            "graph api reported an error"
        );
        return Ok(GraphResponse::Failure { error });
    }

    let limits = parse_limits(&response);
    let payload = serde_json::from_value(body)?;
    Ok(GraphResponse::Success { limits, payload })
}

/// Rate-usage counters from the response header; `None` when the header is
/// missing or malformed.
fn parse_limits(response: &HttpResponse) -> Option<RateLimitInfo> {
    let raw = response.header(APP_USAGE_HEADER)?;
    match serde_json::from_str(raw) {
        Ok(limits) => Some(limits),
        Err(e) => {
            tracing::warn!(header = raw, error = %e, "ignoring malformed usage header");
            None
        }
    }
}
