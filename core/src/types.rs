//! Payload DTOs for the Graph API endpoints the client reads.
//!
//! # Design
//! Members the server may leave out, either because the field selector
//! skipped them or because the caller lacks permission, are `Option` or
//! `#[serde(default)]` so partial objects still decode. Timestamps stay as
//! the server's strings (`2021-04-05T19:59:49+0000`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of graph node a feed is requested for. Only groups expose a feed
/// endpoint here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Group,
    Post,
}

/// Parameters of an OAuth token exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "grant_type", rename_all = "snake_case")]
pub enum LoginParams {
    /// Exchange a short-lived user access token for a long-lived one.
    FbExchangeToken {
        client_id: String,
        client_secret: String,
        fb_exchange_token: String,
    },
    /// Obtain an app access token.
    ClientCredentials {
        client_id: String,
        client_secret: String,
    },
}

impl LoginParams {
    /// Query pairs in the order they are sent, `grant_type` first.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        match self {
            LoginParams::FbExchangeToken {
                client_id,
                client_secret,
                fb_exchange_token,
            } => vec![
                ("grant_type", "fb_exchange_token"),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("fb_exchange_token", fb_exchange_token.as_str()),
            ],
            LoginParams::ClientCredentials {
                client_id,
                client_secret,
            } => vec![
                ("grant_type", "client_credentials"),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until expiry; app tokens do not expire and omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover: Option<Cover>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub member_count: Option<u64>,
    #[serde(default)]
    pub member_request_count: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<Picture>,
    #[serde(default)]
    pub privacy: Option<String>,
    #[serde(default)]
    pub parent: Option<Value>,
    /// Only requested by the "my groups" listing.
    #[serde(default)]
    pub administrator: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cover {
    pub id: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub data: PictureData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureData {
    pub height: u32,
    pub width: u32,
    pub is_silhouette: bool,
    pub url: String,
}

/// A group the app is installed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAppInstalledFor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalCount {
    pub total_count: u64,
}

/// One aliased `reactions.type(X).limit(0).summary(total_count)` block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSummary {
    pub summary: TotalCount,
}

/// The ten per-type reaction counts requested alongside posts and comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reactions {
    pub reactions_none: ReactionSummary,
    pub reactions_like: ReactionSummary,
    pub reactions_love: ReactionSummary,
    pub reactions_wow: ReactionSummary,
    pub reactions_haha: ReactionSummary,
    pub reactions_sad: ReactionSummary,
    pub reactions_angry: ReactionSummary,
    pub reactions_thankful: ReactionSummary,
    pub reactions_pride: ReactionSummary,
    pub reactions_care: ReactionSummary,
}

impl Reactions {
    /// Sum over all ten reaction types.
    pub fn total(&self) -> u64 {
        [
            self.reactions_none,
            self.reactions_like,
            self.reactions_love,
            self.reactions_wow,
            self.reactions_haha,
            self.reactions_sad,
            self.reactions_angry,
            self.reactions_thankful,
            self.reactions_pride,
            self.reactions_care,
        ]
        .iter()
        .map(|r| r.summary.total_count)
        .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub updated_time: Option<String>,
    #[serde(default)]
    pub permalink_url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub full_picture: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub shares: Option<Value>,
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub comments: Option<CommentsPreview>,
    #[serde(flatten)]
    pub reactions: Reactions,
}

/// The one-item comment preview embedded in each post. Its paging is not
/// followed; comments are listed through the comments endpoint instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentsPreview {
    #[serde(default)]
    pub data: Vec<NodeRef>,
    #[serde(default)]
    pub summary: Option<CommentsSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsSummary {
    #[serde(default)]
    pub order: Option<String>,
    pub total_count: u64,
    #[serde(default)]
    pub can_comment: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub permalink_url: Option<String>,
    #[serde(default)]
    pub attachment: Option<Attachment>,
    /// Set when this comment replies to another comment.
    #[serde(default)]
    pub parent: Option<CommentParent>,
    #[serde(flatten)]
    pub reactions: Reactions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub media: Option<Value>,
    #[serde(default)]
    pub target: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentParent {
    pub id: String,
    #[serde(default)]
    pub created_time: Option<String>,
}

/// One page of an edge listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphResult<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl<T> GraphResult<T> {
    /// Absolute URL of the following page, if the server reported one.
    pub fn next_page(&self) -> Option<&str> {
        self.paging.as_ref().and_then(|p| p.next.as_deref())
    }

    pub fn previous_page(&self) -> Option<&str> {
        self.paging.as_ref().and_then(|p| p.previous.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursors: Option<Cursors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursors {
    pub after: String,
    pub before: String,
}

/// Change notification sent when the app is installed in or removed from a
/// group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInstallWebhook {
    pub field: String,
    pub value: GroupInstallChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInstallChange {
    pub group_id: String,
    pub update_time: String,
    /// Action taken, e.g. `install` or `uninstall`.
    pub verb: String,
    /// Admin who installed or removed the app.
    pub actor_id: String,
}

/// Envelope of a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse<T> {
    pub entry: Vec<WebhookEntry<T>>,
    pub object: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEntry<T> {
    pub time: i64,
    pub changes: Vec<T>,
    pub id: String,
    pub uid: String,
}
