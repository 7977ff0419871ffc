//! Endpoint builder for the Graph API.
//!
//! # Design
//! `GraphApi` holds an access token, the connection settings and an
//! `Executor`, and nothing else. Each operation is split into a `build_*`
//! method that renders the `HttpRequest` from the endpoint catalog and an
//! async `get_*` method that hands that request to the executor. The
//! `build_*` half is pure, so path and query rendering is tested without
//! any I/O.
//!
//! The token is set once at construction and never refreshed; callers that
//! receive a `TokenExpired` error exchange it through `login` themselves.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::GraphConfig;
use crate::endpoints::{Endpoint, OAUTH_TOKEN_PATH};
use crate::envelope::GraphResponse;
use crate::error::GraphError;
use crate::executor::Executor;
use crate::http::HttpRequest;
use crate::paging::continuation_path;
use crate::transport::{Transport, UreqTransport};
use crate::types::{
    Comment, Group, GroupAppInstalledFor, GraphResult, LoginParams, LoginResult, NodeType, Post,
};

/// Exchange credentials for an access token against the production API.
pub async fn login(params: &LoginParams) -> Result<GraphResponse<LoginResult>, GraphError> {
    let config = GraphConfig::default();
    let executor = Executor::new(Arc::new(UreqTransport::new(&config.base_url)));
    login_with(&executor, &config, params).await
}

/// `login` through a caller-provided executor and settings.
pub async fn login_with(
    executor: &Executor,
    config: &GraphConfig,
    params: &LoginParams,
) -> Result<GraphResponse<LoginResult>, GraphError> {
    executor.execute(build_login(config, params)?).await
}

/// Render the token exchange request. Every login parameter travels in the
/// query string.
pub fn build_login(config: &GraphConfig, params: &LoginParams) -> Result<HttpRequest, GraphError> {
    let query = serde_urlencoded::to_string(params.query_pairs())?;
    Ok(HttpRequest::get(format!(
        "{}{OAUTH_TOKEN_PATH}?{query}",
        config.oauth_version
    )))
}

/// Read client for one access token.
#[derive(Clone)]
pub struct GraphApi {
    access_token: String,
    config: GraphConfig,
    executor: Executor,
}

impl std::fmt::Debug for GraphApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphApi")
            .field("access_token", &"<redacted>")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GraphApi {
    /// Client for the production API. The token may be short- or long-lived.
    pub fn new(access_token: &str) -> Self {
        Self::with_config(access_token, GraphConfig::default())
    }

    pub fn with_config(access_token: &str, config: GraphConfig) -> Self {
        let transport = Arc::new(UreqTransport::new(&config.base_url));
        Self::with_transport(access_token, config, transport)
    }

    pub fn with_transport(
        access_token: &str,
        config: GraphConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            access_token: access_token.to_string(),
            config,
            executor: Executor::new(transport),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    fn render(
        &self,
        endpoint: Endpoint,
        id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<HttpRequest, GraphError> {
        let path = endpoint.template().render(
            &self.config.graph_version,
            id,
            &self.access_token,
            limit,
        )?;
        Ok(HttpRequest::get(path))
    }

    pub fn build_user_group(&self, group_id: &str) -> Result<HttpRequest, GraphError> {
        self.render(Endpoint::UserGroup, Some(group_id), None)
    }

    /// Groups the token's user administers; always sends `admin_only=true`.
    pub fn build_user_groups(&self) -> Result<HttpRequest, GraphError> {
        self.render(Endpoint::UserGroups, None, None)
    }

    pub fn build_groups_app_installed_for(&self, client_id: &str) -> Result<HttpRequest, GraphError> {
        self.render(Endpoint::AppInstalledGroups, Some(client_id), None)
    }

    /// Feed of a node. Only groups have a feed; `NodeType::Post` is refused
    /// before any request is rendered.
    pub fn build_node_feed(
        &self,
        id: &str,
        node_type: NodeType,
        limit: Option<u32>,
    ) -> Result<HttpRequest, GraphError> {
        match node_type {
            NodeType::Group => self.render(Endpoint::GroupFeed, Some(id), limit),
            NodeType::Post => Err(GraphError::UnsupportedNodeType(node_type)),
        }
    }

    pub fn build_node_comments(&self, id: &str, limit: Option<u32>) -> Result<HttpRequest, GraphError> {
        self.render(Endpoint::NodeComments, Some(id), limit)
    }

    /// Re-issue a `paging.next`/`paging.previous` URL against the configured
    /// host, optionally overriding its `limit`.
    pub fn build_next_page(
        &self,
        page_url: &str,
        force_limit: Option<u32>,
    ) -> Result<HttpRequest, GraphError> {
        let path = continuation_path(&self.config.base_url, page_url, force_limit)?;
        Ok(HttpRequest::get(path))
    }

    pub async fn get_user_group(&self, group_id: &str) -> Result<GraphResponse<Group>, GraphError> {
        self.executor.execute(self.build_user_group(group_id)?).await
    }

    pub async fn get_user_groups(&self) -> Result<GraphResponse<GraphResult<Group>>, GraphError> {
        self.executor.execute(self.build_user_groups()?).await
    }

    pub async fn get_groups_app_installed_for(
        &self,
        client_id: &str,
    ) -> Result<GraphResponse<GraphResult<GroupAppInstalledFor>>, GraphError> {
        self.executor
            .execute(self.build_groups_app_installed_for(client_id)?)
            .await
    }

    pub async fn get_node_feed(
        &self,
        id: &str,
        node_type: NodeType,
        limit: Option<u32>,
    ) -> Result<GraphResponse<GraphResult<Post>>, GraphError> {
        self.executor
            .execute(self.build_node_feed(id, node_type, limit)?)
            .await
    }

    pub async fn get_node_comments(
        &self,
        id: &str,
        limit: Option<u32>,
    ) -> Result<GraphResponse<GraphResult<Comment>>, GraphError> {
        self.executor
            .execute(self.build_node_comments(id, limit)?)
            .await
    }

    /// Fetch the page behind a continuation URL. `T` is the item type of the
    /// listing the URL came from.
    pub async fn get_next_page<T: DeserializeOwned>(
        &self,
        page_url: &str,
        force_limit: Option<u32>,
    ) -> Result<GraphResponse<GraphResult<T>>, GraphError> {
        self.executor
            .execute(self.build_next_page(page_url, force_limit)?)
            .await
    }
}
