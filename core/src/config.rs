//! Connection settings for the Graph API.
//!
//! Defaults target production. Tests and local development point
//! `base_url` at the mock server instead.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";
/// Version prefix used only by the OAuth token exchange.
pub const OAUTH_VERSION: &str = "/v5.0";
/// Version prefix used by every other endpoint.
pub const GRAPH_VERSION: &str = "/v10.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Scheme and authority, no trailing path, e.g. `https://graph.facebook.com`.
    pub base_url: String,
    pub oauth_version: String,
    pub graph_version: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            oauth_version: OAUTH_VERSION.to_string(),
            graph_version: GRAPH_VERSION.to_string(),
        }
    }
}

impl GraphConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_oauth_version(mut self, version: &str) -> Self {
        self.oauth_version = version.to_string();
        self
    }

    pub fn with_graph_version(mut self, version: &str) -> Self {
        self.graph_version = version.to_string();
        self
    }
}
