//! Profile, starred count and token validation requests

use reqwest::header::LINK;

use crate::error::{GhfetchError, Result};
use crate::github::client::GitHubClient;
use crate::github::error_handler::last_page;
use crate::github::models::{Profile, TokenInfo};

/// Header listing the OAuth scopes of the token used
const OAUTH_SCOPES_HEADER: &str = "x-oauth-scopes";

/// Profile operations handler
pub struct ProfileHandler<'a> {
    client: &'a GitHubClient,
}

impl<'a> ProfileHandler<'a> {
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Fetch a user's public profile
    ///
    /// Fails with `UserNotFound` for unknown logins and `RateLimited` when
    /// GitHub refuses the request.
    pub async fn fetch_profile(&self, username: &str) -> Result<Profile> {
        // Nothing GitHub could accept as a login can exist there
        if !is_valid_username(username) {
            return Err(GhfetchError::UserNotFound(username.to_string()));
        }

        let (profile, _) = self
            .client
            .get_json::<Profile>(&format!("/users/{}", username), &[], username)
            .await?;

        tracing::debug!(login = %profile.login, "profile fetched");
        Ok(profile)
    }

    /// Count the repositories a user has starred
    ///
    /// Asks for one item per page so the `rel="last"` page number equals the
    /// total. Without a Link header the listed items are the whole set.
    pub async fn fetch_starred_count(&self, username: &str) -> Result<u64> {
        let (starred, headers) = self
            .client
            .get_json::<Vec<serde_json::Value>>(
                &format!("/users/{}/starred", username),
                &[("per_page", "1")],
                username,
            )
            .await?;

        let from_link = headers
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(last_page);

        Ok(from_link.unwrap_or(starred.len() as u64))
    }

    /// Check the configured token against `GET /user`
    pub async fn validate_token(&self) -> Result<TokenInfo> {
        if !self.client.has_token() {
            return Err(GhfetchError::TokenMissing);
        }

        #[derive(serde::Deserialize)]
        struct Viewer {
            login: String,
        }

        let result = self.client.get_json::<Viewer>("/user", &[], "").await;
        let (viewer, headers) = match result {
            Ok(ok) => ok,
            Err(GhfetchError::Unauthorized) => {
                return Err(GhfetchError::AuthenticationFailed(
                    "Invalid token: authentication failed.".into(),
                ))
            }
            Err(e) => return Err(e),
        };

        let scopes = headers
            .get(OAUTH_SCOPES_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(parse_scopes)
            .unwrap_or_default();

        Ok(TokenInfo {
            login: viewer.login,
            scopes,
        })
    }
}

/// Logins are ASCII alphanumerics and hyphens, at most 39 chars, not
/// starting with a hyphen.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 39
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !username.starts_with('-')
}

fn parse_scopes(header: &str) -> Vec<String> {
    header
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
