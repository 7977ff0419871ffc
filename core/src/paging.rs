//! Re-entry of `paging.next` / `paging.previous` URLs.
//!
//! The URL comes back from an earlier response, possibly after being stored
//! somewhere, so it is parsed before use and its host must match the
//! configured API host: the query carries the access token. Only the path
//! and query are re-issued.

use url::Url;

use crate::error::GraphError;

/// Host-relative path+query to request for `page_url`.
///
/// Without `force_limit` the query is kept byte for byte. With it, the first
/// `limit` pair is rewritten in place, later duplicates are dropped, and the
/// pair is appended if absent. A forced limit of zero is ignored.
pub fn continuation_path(
    base_url: &str,
    page_url: &str,
    force_limit: Option<u32>,
) -> Result<String, GraphError> {
    let invalid = |reason: String| GraphError::InvalidPageUrl {
        url: page_url.to_string(),
        reason,
    };

    let url = Url::parse(page_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }

    let base = Url::parse(base_url).map_err(|e| invalid(format!("bad API base url: {e}")))?;
    if url.host_str() != base.host_str() || url.port_or_known_default() != base.port_or_known_default()
    {
        return Err(GraphError::UntrustedPageUrl(
            url.host_str().unwrap_or_default().to_string(),
        ));
    }

    let query = match force_limit.filter(|limit| *limit > 0) {
        Some(limit) => Some(with_limit(url.query().unwrap_or_default(), limit)),
        None => url.query().map(str::to_string),
    };

    let mut path = url.path().to_string();
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        path.push('?');
        path.push_str(&query);
    }
    Ok(path)
}

fn with_limit(query: &str, limit: u32) -> String {
    let replacement = format!("limit={limit}");
    let mut replaced = false;
    let mut pairs = Vec::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let key = pair.split_once('=').map_or(pair, |(key, _)| key);
        if key != "limit" {
            pairs.push(pair);
        } else if !replaced {
            pairs.push(replacement.as_str());
            replaced = true;
        }
    }
    if !replaced {
        pairs.push(replacement.as_str());
    }
    pairs.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://graph.facebook.com";
    const NEXT: &str = "https://graph.facebook.com/v10.0/1/feed?fields=id%2Ccreated_time%2Creactions.fields(id%2Ctype).summary(true)&limit=50&access_token=secretAccessToken&after=QVFIUm";

    #[test]
    fn keeps_path_and_query_verbatim() {
        let path = continuation_path(BASE, NEXT, None).unwrap();
        assert_eq!(
            path,
            "/v10.0/1/feed?fields=id%2Ccreated_time%2Creactions.fields(id%2Ctype).summary(true)&limit=50&access_token=secretAccessToken&after=QVFIUm"
        );
    }

    #[test]
    fn force_limit_rewrites_only_limit() {
        let path = continuation_path(BASE, NEXT, Some(100)).unwrap();
        assert_eq!(
            path,
            "/v10.0/1/feed?fields=id%2Ccreated_time%2Creactions.fields(id%2Ctype).summary(true)&limit=100&access_token=secretAccessToken&after=QVFIUm"
        );
    }

    #[test]
    fn force_limit_is_appended_when_missing() {
        let path =
            continuation_path(BASE, "https://graph.facebook.com/v10.0/1/comments?after=x", Some(5))
                .unwrap();
        assert_eq!(path, "/v10.0/1/comments?after=x&limit=5");

        let bare = continuation_path(BASE, "https://graph.facebook.com/v10.0/1/comments", Some(5))
            .unwrap();
        assert_eq!(bare, "/v10.0/1/comments?limit=5");
    }

    #[test]
    fn duplicate_limits_collapse() {
        let path = continuation_path(
            BASE,
            "https://graph.facebook.com/v10.0/1/feed?limit=10&a=b&limit=30",
            Some(7),
        )
        .unwrap();
        assert_eq!(path, "/v10.0/1/feed?limit=7&a=b");
    }

    #[test]
    fn zero_force_limit_is_ignored() {
        let path = continuation_path(BASE, NEXT, Some(0)).unwrap();
        assert!(path.contains("&limit=50&"));
    }

    #[test]
    fn limit_prefixed_keys_are_untouched() {
        let path = continuation_path(
            BASE,
            "https://graph.facebook.com/v10.0/1/feed?limiter=1&limit=2",
            Some(3),
        )
        .unwrap();
        assert_eq!(path, "/v10.0/1/feed?limiter=1&limit=3");
    }

    #[test]
    fn rejects_malformed_urls() {
        for url in ["not a url", "/v10.0/1/feed?limit=5", "ftp://graph.facebook.com/v10.0/1"] {
            let err = continuation_path(BASE, url, None).unwrap_err();
            assert!(matches!(err, GraphError::InvalidPageUrl { .. }), "{url}");
        }
    }

    #[test]
    fn rejects_foreign_hosts() {
        let err = continuation_path(BASE, "https://evil.example/v10.0/1/feed?limit=5", None)
            .unwrap_err();
        assert!(matches!(err, GraphError::UntrustedPageUrl(host) if host == "evil.example"));

        let err = continuation_path(BASE, "https://graph.facebook.com:8443/v10.0/1/feed", None)
            .unwrap_err();
        assert!(matches!(err, GraphError::UntrustedPageUrl(_)));
    }

    #[test]
    fn explicit_default_port_matches() {
        let path =
            continuation_path(BASE, "https://graph.facebook.com:443/v10.0/1/feed?limit=5", None)
                .unwrap();
        assert_eq!(path, "/v10.0/1/feed?limit=5");
    }
}
