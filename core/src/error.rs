//! Error types for the Graph API client.
//!
//! # Design
//! `GraphError` is the fault channel: transport failures, undecodable bodies
//! and calls rejected before any request is sent. Errors the Graph API
//! reports in a well-formed body are not faults; they arrive as
//! `GraphResponse::Failure` carrying an `ApiError` (see `envelope`).

use thiserror::Error;

use crate::types::NodeType;

/// Faults returned by `GraphApi` operations and the executor.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The connection could not be made or broke mid-exchange.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not JSON, or not the JSON shape the operation expects.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Query parameters could not be form-encoded.
    #[error("failed to encode query: {0}")]
    Encode(String),

    /// A node id that cannot be substituted into a path segment.
    #[error("invalid node id: {0:?}")]
    InvalidNodeId(String),

    /// A continuation URL that does not parse or is not http(s).
    #[error("invalid paging url {url:?}: {reason}")]
    InvalidPageUrl { url: String, reason: String },

    /// A continuation URL pointing at a host other than the configured API host.
    #[error("paging url host does not match the API host: {0}")]
    UntrustedPageUrl(String),

    /// Feed lookup for a node type that has no feed endpoint.
    #[error("feed is not supported for node type {0:?}")]
    UnsupportedNodeType(NodeType),

    /// The blocking send task panicked or was cancelled.
    #[error("request task failed: {0}")]
    Task(String),
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Decode(err.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for GraphError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        GraphError::Encode(err.to_string())
    }
}
