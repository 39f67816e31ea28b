//! GitHub API error detection and classification
//!
//! Maps HTTP statuses, rate-limit headers and GraphQL error lists onto
//! `GhfetchError` so the CLI can print actionable guidance.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::error::GhfetchError;
use crate::github::models::GraphQlError;

/// Header carrying the epoch second at which the rate limit window resets
const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Regex pattern to pull the `rel="last"` page number out of a Link header
static LAST_PAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<[^>]*[?&]page=(\d+)[^>]*>;\s*rel="last""#)
        .expect("Invalid regex pattern for Link header parsing")
});

/// Classifies a non-success REST response for a user-scoped request
///
/// `username` is the login the request was about, used for `UserNotFound`.
pub fn classify_status(status: StatusCode, headers: &HeaderMap, username: &str) -> GhfetchError {
    match status {
        StatusCode::NOT_FOUND => GhfetchError::UserNotFound(username.to_string()),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => GhfetchError::RateLimited {
            reset_at: rate_limit_reset(headers),
        },
        StatusCode::UNAUTHORIZED => GhfetchError::Unauthorized,
        other => GhfetchError::Network(format!("GitHub API returned HTTP {}", other.as_u16())),
    }
}

/// Classifies the `errors` list of a GraphQL response
pub fn classify_graphql_errors(errors: &[GraphQlError], username: &str) -> GhfetchError {
    if errors
        .iter()
        .any(|e| e.kind.as_deref() == Some("NOT_FOUND"))
    {
        return GhfetchError::UserNotFound(username.to_string());
    }

    if errors
        .iter()
        .any(|e| e.kind.as_deref() == Some("RATE_LIMITED"))
    {
        return GhfetchError::RateLimited { reset_at: None };
    }

    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    GhfetchError::Network(format!("GraphQL reported errors: {}", messages.join("; ")))
}

/// Read the rate limit reset time, if GitHub sent one
pub fn rate_limit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    headers
        .get(RATE_LIMIT_RESET_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/// Page number of the `rel="last"` link, if any
pub fn last_page(link_header: &str) -> Option<u64> {
    LAST_PAGE_PATTERN
        .captures(link_header)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
