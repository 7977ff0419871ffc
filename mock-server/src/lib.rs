//! In-memory stand-in for the slice of the Graph API the client reads.
//!
//! Serves seeded groups, posts and comments with cursor pagination, answers
//! token exchanges for one known app, and reports errors in the Graph API's
//! `{"error": {...}}` shape. Every successful reply carries an `x-app-usage`
//! header.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const OAUTH_VERSION: &str = "/v5.0";
pub const GRAPH_VERSION: &str = "/v10.0";
pub const APP_ID: &str = "appId";
pub const APP_SECRET: &str = "appSecret";
/// Token the server treats as expired.
pub const EXPIRED_TOKEN: &str = "expired";
/// Lifetime reported for exchanged user tokens, in seconds.
pub const LONG_LIVED_EXPIRY: u64 = 5_183_944;
pub const USAGE_HEADER: &str = "x-app-usage";

const DEFAULT_PAGE_SIZE: usize = 25;
const REACTION_KEYS: [&str; 10] = [
    "reactions_none",
    "reactions_like",
    "reactions_love",
    "reactions_wow",
    "reactions_haha",
    "reactions_sad",
    "reactions_angry",
    "reactions_thankful",
    "reactions_pride",
    "reactions_care",
];

#[derive(Debug, Clone)]
pub struct MockGroup {
    pub id: String,
    pub name: String,
    pub administrator: bool,
    pub app_installed: bool,
}

/// Everything the server can answer with. Read-only once serving starts.
#[derive(Debug, Clone, Default)]
pub struct GraphData {
    pub groups: Vec<MockGroup>,
    /// Feed entries keyed by group id, newest first.
    pub feeds: HashMap<String, Vec<Value>>,
    /// Comments keyed by the commented node id.
    pub comments: HashMap<String, Vec<Value>>,
}

pub type Db = Arc<GraphData>;

impl GraphData {
    /// Two groups, 45 posts in the administered one, 3 comments on its
    /// newest post.
    pub fn seeded() -> Self {
        let groups = vec![
            MockGroup {
                id: "12345".to_string(),
                name: "Rustaceans".to_string(),
                administrator: true,
                app_installed: true,
            },
            MockGroup {
                id: "67890".to_string(),
                name: "Graph Testers".to_string(),
                administrator: false,
                app_installed: false,
            },
        ];

        let posts = (1..=45)
            .rev()
            .map(|n| {
                let mut post = json!({
                    "id": format!("12345_{n}"),
                    "created_time": format!("2021-05-{:02}T19:29:03+0000", n % 28 + 1),
                    "updated_time": format!("2021-05-{:02}T19:29:03+0000", n % 28 + 1),
                    "permalink_url": format!("https://www.facebook.com/groups/12345/permalink/{n}/"),
                    "type": "status",
                    "message": format!("post number {n}"),
                    "comments": {
                        "data": [],
                        "summary": {"order": "ranked", "total_count": 0, "can_comment": true}
                    }
                });
                add_reactions(&mut post, n);
                post
            })
            .collect();

        let comments = (1..=3)
            .map(|n| {
                let mut comment = json!({
                    "id": format!("45_{n}"),
                    "created_time": format!("2021-05-06T2{n}:00:00+0000"),
                    "message": format!("comment {n}"),
                    "permalink_url": format!("https://www.facebook.com/groups/12345/permalink/45/?comment_id={n}"),
                });
                add_reactions(&mut comment, n);
                comment
            })
            .collect();

        Self {
            groups,
            feeds: HashMap::from([("12345".to_string(), posts)]),
            comments: HashMap::from([("12345_45".to_string(), comments)]),
        }
    }
}

fn add_reactions(node: &mut Value, seed: usize) {
    for (i, key) in REACTION_KEYS.iter().enumerate() {
        let count = if i == 1 { seed } else { 0 };
        node[*key] = json!({"summary": {"total_count": count}});
    }
}

pub fn app() -> Router {
    app_with(GraphData::seeded())
}

pub fn app_with(data: GraphData) -> Router {
    let db: Db = Arc::new(data);
    Router::new()
        .route(&format!("{OAUTH_VERSION}/oauth/access_token"), get(access_token))
        .route(&format!("{GRAPH_VERSION}/me/groups"), get(user_groups))
        .route(&format!("{GRAPH_VERSION}/{{id}}"), get(group))
        .route(&format!("{GRAPH_VERSION}/{{id}}/feed"), get(feed))
        .route(&format!("{GRAPH_VERSION}/{{id}}/comments"), get(comments))
        .route(
            &format!("{GRAPH_VERSION}/{{id}}/app_installed_groups"),
            get(app_installed_groups),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type Params = HashMap<String, String>;

fn ok(body: Value) -> Response {
    let usage = json!({"call_count": 1, "total_time": 1, "total_cputime": 1}).to_string();
    ([(USAGE_HEADER, usage)], Json(body)).into_response()
}

fn graph_error(message: &str, kind: &str, code: u32, subcode: Option<u32>) -> Response {
    let mut error = json!({
        "message": message,
        "type": kind,
        "code": code,
        "fbtrace_id": "AmockTraceId",
    });
    if let Some(subcode) = subcode {
        error["error_subcode"] = json!(subcode);
    }
    (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response()
}

/// Graph routes require a live `access_token`.
fn authorize(params: &Params) -> Result<(), Response> {
    match params.get("access_token").map(String::as_str) {
        None | Some("") => Err(graph_error(
            "An access token is required to request this resource.",
            "OAuthException",
            104,
            None,
        )),
        Some(EXPIRED_TOKEN) => Err(graph_error(
            "Error validating access token: Session has expired.",
            "OAuthException",
            190,
            Some(463),
        )),
        Some(_) => Ok(()),
    }
}

fn unknown_object(id: &str) -> Response {
    graph_error(
        &format!("Unsupported get request. Object with ID '{id}' does not exist."),
        "GraphMethodException",
        100,
        Some(33),
    )
}

async fn access_token(Query(params): Query<Params>) -> Response {
    let param = |key: &str| params.get(key).map(String::as_str).unwrap_or_default();
    if param("client_id") != APP_ID || param("client_secret") != APP_SECRET {
        return graph_error("Error validating client secret.", "OAuthException", 1, None);
    }
    match param("grant_type") {
        "fb_exchange_token" if !param("fb_exchange_token").is_empty() => ok(json!({
            "access_token": format!("long-lived-{}", param("fb_exchange_token")),
            "token_type": "bearer",
            "expires_in": LONG_LIVED_EXPIRY,
        })),
        "fb_exchange_token" => graph_error(
            "Missing fb_exchange_token parameter.",
            "OAuthException",
            100,
            None,
        ),
        "client_credentials" => ok(json!({
            "access_token": format!("{APP_ID}|app-token"),
            "token_type": "bearer",
        })),
        other => graph_error(
            &format!("Unsupported grant_type {other:?}."),
            "OAuthException",
            100,
            None,
        ),
    }
}

fn group_json(group: &MockGroup, with_administrator: bool) -> Value {
    let mut value = json!({
        "id": group.id,
        "name": group.name,
        "privacy": "CLOSED",
        "archived": false,
        "member_count": 42,
        "member_request_count": 0,
        "created_time": "2021-04-05T19:59:49+0000",
    });
    if with_administrator {
        value["administrator"] = json!(group.administrator);
    }
    value
}

async fn group(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> Response {
    if let Err(denied) = authorize(&params) {
        return denied;
    }
    match db.groups.iter().find(|g| g.id == id) {
        Some(group) => ok(group_json(group, false)),
        None => unknown_object(&id),
    }
}

async fn user_groups(State(db): State<Db>, Query(params): Query<Params>) -> Response {
    if let Err(denied) = authorize(&params) {
        return denied;
    }
    let admin_only = params.get("admin_only").is_some_and(|v| v == "true");
    let data: Vec<Value> = db
        .groups
        .iter()
        .filter(|g| !admin_only || g.administrator)
        .map(|g| group_json(g, true))
        .collect();
    ok(json!({ "data": data, "paging": {} }))
}

async fn app_installed_groups(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> Response {
    if let Err(denied) = authorize(&params) {
        return denied;
    }
    if id != APP_ID {
        return unknown_object(&id);
    }
    let data: Vec<Value> = db
        .groups
        .iter()
        .filter(|g| g.app_installed)
        .map(|g| json!({"id": g.id, "name": g.name}))
        .collect();
    ok(json!({ "data": data, "paging": {} }))
}

async fn feed(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = authorize(&params) {
        return denied;
    }
    match db.feeds.get(&id) {
        Some(posts) => paged(posts, &params, &listing_url(&headers, &id, "feed")),
        None if db.groups.iter().any(|g| g.id == id) => ok(json!({ "data": [] })),
        None => unknown_object(&id),
    }
}

async fn comments(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = authorize(&params) {
        return denied;
    }
    let items = db.comments.get(&id).map(Vec::as_slice).unwrap_or_default();
    paged(items, &params, &listing_url(&headers, &id, "comments"))
}

fn paged(items: &[Value], params: &Params, url: &str) -> Response {
    match page(items, params, url) {
        Ok(body) => ok(body),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode paging link");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": {
                    "message": "An unexpected error has occurred.",
                    "type": "OAuthException",
                    "code": 2,
                    "fbtrace_id": "AmockTraceId",
                }})),
            )
                .into_response()
        }
    }
}

fn listing_url(headers: &HeaderMap, id: &str, edge: &str) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("127.0.0.1");
    format!("http://{host}{GRAPH_VERSION}/{id}/{edge}")
}

/// Slice one page out of `items`. Cursors are item offsets: `after` is
/// exclusive, `before` is exclusive.
fn page(
    items: &[Value],
    params: &Params,
    url: &str,
) -> Result<Value, serde_urlencoded::ser::Error> {
    let cursor = |key: &str| params.get(key).and_then(|c| c.parse::<usize>().ok());
    let limit = cursor("limit")
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let (start, end) = match (cursor("after"), cursor("before")) {
        (Some(after), _) => {
            let start = after.saturating_add(1).min(items.len());
            (start, start.saturating_add(limit).min(items.len()))
        }
        (None, Some(before)) => {
            let end = before.min(items.len());
            (end.saturating_sub(limit), end)
        }
        (None, None) => (0, limit.min(items.len())),
    };
    let data = &items[start..end];

    if data.is_empty() {
        return Ok(json!({ "data": [] }));
    }

    let after = (end - 1).to_string();
    let before = start.to_string();
    let mut paging = json!({ "cursors": { "after": after, "before": before } });
    if end < items.len() {
        paging["next"] = json!(continuation(url, params, "after", &after)?);
    }
    if start > 0 {
        paging["previous"] = json!(continuation(url, params, "before", &before)?);
    }
    Ok(json!({ "data": data, "paging": paging }))
}

/// Absolute URL repeating the request's parameters with a new cursor.
fn continuation(
    url: &str,
    params: &Params,
    cursor: &str,
    value: &str,
) -> Result<String, serde_urlencoded::ser::Error> {
    let mut pairs: Vec<(&str, &str)> = ["fields", "filter", "access_token", "limit"]
        .iter()
        .filter_map(|key| params.get(*key).map(|v| (*key, v.as_str())))
        .collect();
    pairs.push((cursor, value));
    let query = serde_urlencoded::to_string(&pairs)?;
    Ok(format!("{url}?{query}"))
}
