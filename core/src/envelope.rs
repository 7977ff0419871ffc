//! The success/failure envelope every Graph call resolves to.
//!
//! # Design
//! A well-formed error body from the Graph API is ordinary data, so it is a
//! variant of `GraphResponse` rather than an `Err`. Callers match on the
//! envelope and decide their own retry, backoff or token-refresh policy;
//! `ApiError::category` is a hint for that decision and nothing here acts
//! on it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Result of one Graph API call that reached the server and returned JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphResponse<T> {
    /// The body held no top-level `error` object.
    Success {
        /// Present only when the response carried a well-formed usage header.
        limits: Option<RateLimitInfo>,
        payload: T,
    },
    /// The body held a top-level `error` object.
    Failure { error: ApiError },
}

impl<T> GraphResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, GraphResponse::Success { .. })
    }

    pub fn limits(&self) -> Option<&RateLimitInfo> {
        match self {
            GraphResponse::Success { limits, .. } => limits.as_ref(),
            GraphResponse::Failure { .. } => None,
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            GraphResponse::Success { payload, .. } => Some(payload),
            GraphResponse::Failure { .. } => None,
        }
    }

    /// Drop the rate-usage metadata and collapse into a `Result`.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            GraphResponse::Success { payload, .. } => Ok(payload),
            GraphResponse::Failure { error } => Err(error),
        }
    }
}

/// Rate-usage counters from the `x-app-usage` header, as percentages of the
/// application's quota. Numbers are kept as the header wrote them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub call_count: Number,
    pub total_time: Number,
    pub total_cputime: Number,
}

/// Error detail reported by the Graph API.
///
/// Decoding never fails. Members that are missing, `null` or of an
/// unreadable type take their default, and in the last two cases the raw
/// value stays in `extra` under its own key. Numeric strings are accepted
/// for the integer members. Members this type does not name are kept in
/// `extra` too, so re-encoding reproduces the object the server sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ApiError {
    pub message: String,
    pub kind: String,
    pub code: i64,
    pub error_subcode: Option<i64>,
    pub fbtrace_id: String,
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for ApiError {
    fn from(mut members: Map<String, Value>) -> Self {
        let message = take_string(&mut members, "message").unwrap_or_default();
        let kind = take_string(&mut members, "type").unwrap_or_default();
        let code = take_int(&mut members, "code").unwrap_or_default();
        let error_subcode = take_int(&mut members, "error_subcode");
        let fbtrace_id = take_string(&mut members, "fbtrace_id").unwrap_or_default();
        Self {
            message,
            kind,
            code,
            error_subcode,
            fbtrace_id,
            extra: members,
        }
    }
}

impl From<ApiError> for Map<String, Value> {
    fn from(error: ApiError) -> Self {
        let mut members = error.extra;
        // A raw value parked in `extra` wins over a defaulted member.
        let mut put = |key: &str, value: Value, is_default: bool| {
            if !(is_default && members.contains_key(key)) {
                members.insert(key.to_string(), value);
            }
        };
        put("message", Value::from(error.message.as_str()), error.message.is_empty());
        put("type", Value::from(error.kind.as_str()), error.kind.is_empty());
        put("code", Value::from(error.code), error.code == 0);
        if let Some(subcode) = error.error_subcode {
            put("error_subcode", Value::from(subcode), false);
        }
        put(
            "fbtrace_id",
            Value::from(error.fbtrace_id.as_str()),
            error.fbtrace_id.is_empty(),
        );
        members
    }
}

/// Remove `key` as a string. Anything unreadable is put back.
fn take_string(members: &mut Map<String, Value>, key: &str) -> Option<String> {
    match members.remove(key)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        other => {
            members.insert(key.to_string(), other);
            None
        }
    }
}

/// Remove `key` as an integer, accepting numeric strings. Anything
/// unreadable is put back.
fn take_int(members: &mut Map<String, Value>, key: &str) -> Option<i64> {
    let raw = members.remove(key)?;
    let parsed = match &raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    if parsed.is_none() {
        members.insert(key.to_string(), raw);
    }
    parsed
}

/// Informational grouping of Graph API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transient server-side failure: API Unknown (1), API Service (2),
    /// temporarily blocked for policy violations (368).
    Retryable,
    /// Too many calls (4), user too many calls (17), application limit (341).
    RateLimited,
    /// The access token has expired (190) and must be exchanged again.
    TokenExpired,
    Other,
}

impl ApiError {
    pub fn category(&self) -> ErrorCategory {
        match self.code {
            1 | 2 | 368 => ErrorCategory::Retryable,
            4 | 17 | 341 => ErrorCategory::RateLimited,
            190 => ErrorCategory::TokenExpired,
            _ => ErrorCategory::Other,
        }
    }
}
