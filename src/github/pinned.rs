//! Pinned repositories via GraphQL

use serde::Serialize;

use crate::error::{GhfetchError, Result};
use crate::github::client::GitHubClient;
use crate::github::models::{PinnedUser, RepoSummary};

/// GitHub shows at most six pinned items
pub const MAX_PINNED: usize = 6;

const PINNED_QUERY: &str = r#"
query($login: String!) {
    user(login: $login) {
        pinnedItems(first: 6, types: [REPOSITORY]) {
            nodes {
                ... on Repository {
                    name
                    description
                    owner { login }
                    stargazerCount
                    forkCount
                    primaryLanguage { name }
                }
            }
        }
    }
}
"#;

#[derive(Serialize)]
struct LoginVariables<'a> {
    login: &'a str,
}

/// Fetch a user's pinned repositories in display order
///
/// GraphQL requires authentication, so without a token this is an empty
/// list and no request is made.
pub async fn fetch_pinned(client: &GitHubClient, username: &str) -> Result<Vec<RepoSummary>> {
    if !client.has_token() {
        tracing::debug!("no token, skipping pinned repositories");
        return Ok(Vec::new());
    }

    let user: Option<PinnedUser> = client
        .graphql_user(PINNED_QUERY, &LoginVariables { login: username }, username)
        .await?;

    let user = user.ok_or_else(|| GhfetchError::UserNotFound(username.to_string()))?;

    Ok(user
        .pinned_items
        .nodes
        .into_iter()
        .flatten()
        .take(MAX_PINNED)
        .map(RepoSummary::from)
        .collect())
}
