//! Read-only client core for the Facebook Graph API.
//!
//! # Overview
//! Renders requests for a fixed set of endpoints (token exchange, group
//! lookup and listing, app-installed groups, group feed, comments, paging
//! continuation), performs one GET per call and normalizes the reply into a
//! `GraphResponse` envelope.
//!
//! # Design
//! - `GraphApi` holds only an access token, settings and an executor.
//! - Each operation is split into `build_*` (pure, produces an
//!   `HttpRequest`) and an async `get_*` that runs it through the
//!   `Executor`, so the I/O boundary is explicit.
//! - Errors reported by the API are data (`GraphResponse::Failure`);
//!   transport and decode faults are `Err(GraphError)`.
//! - One request per call: no retries, rate limiting or caching.
//!
//! ```rust,ignore
//! use fbgraph_core::{GraphApi, GraphResponse, NodeType};
//!
//! let api = GraphApi::new(&token);
//! match api.get_node_feed("1234", NodeType::Group, Some(50)).await? {
//!     GraphResponse::Success { payload, limits } => { /* ... */ }
//!     GraphResponse::Failure { error } => { /* inspect error.code */ }
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod http;
pub mod paging;
pub mod transport;
pub mod types;

pub use client::{build_login, login, login_with, GraphApi};
pub use config::GraphConfig;
pub use envelope::{ApiError, ErrorCategory, GraphResponse, RateLimitInfo};
pub use error::GraphError;
pub use executor::{parse_response, Executor};
pub use http::{HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Comment, Group, GroupAppInstalledFor, GroupInstallWebhook, GraphResult, LoginParams,
    LoginResult, NodeType, Paging, Post, Reactions, WebhookResponse,
};
