//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `GraphApi::build_*` methods produce
//! an `HttpRequest` holding a host-relative path; a `Transport` resolves it
//! against the configured API host, performs the GET and hands back an
//! `HttpResponse`. Classification of the response happens in
//! `executor::parse_response`, which never touches the network.

/// Name of the response header carrying rate-usage counters.
pub const APP_USAGE_HEADER: &str = "x-app-usage";

/// A GET request described as plain data.
///
/// `path` is host-relative and already carries the URL-encoded query
/// string, e.g. `/v10.0/me/groups?fields=...&access_token=...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// A GET for `path` with the JSON `Accept` header every Graph call sends.
    pub fn get(path: String) -> Self {
        Self {
            path,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// The route without its query string.
    ///
    /// Safe to log: the query holds the access token, the route does not.
    pub fn route(&self) -> &str {
        self.path.split_once('?').map_or(self.path.as_str(), |(route, _)| route)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup returning the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
