//! The network seam: one blocking GET per call.
//!
//! `UreqTransport` is the production implementation. Anything else that can
//! turn an `HttpRequest` into an `HttpResponse` (an in-process fake, a
//! recorded fixture) implements `Transport` and is handed to
//! `GraphApi::with_transport`.

use std::time::Instant;

use crate::error::GraphError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    /// Perform the request and buffer the whole body.
    ///
    /// Non-2xx statuses are data, not errors: the caller classifies the body.
    /// Only connection-level failures return `Err`.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, GraphError>;
}

/// `ureq` agent bound to one API host. Connections are never pooled: every
/// call dials its own.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_idle_connections(0)
            .max_idle_connections_per_host(0)
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, GraphError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.agent.get(&url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let started = Instant::now();
        let mut response = builder
            .call()
            .map_err(|e| GraphError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| GraphError::Transport(e.to_string()))?;

        tracing::debug!(
            route = request.route(),
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "graph response received"
        );

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
