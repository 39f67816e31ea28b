//! GitHub API client built on reqwest
//!
//! The client owns its configuration: token, endpoints and user agent are
//! passed in once through `ClientConfig` rather than looked up globally.

use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::config::DEFAULT_API_URL;
use crate::error::{GhfetchError, Result};
use crate::github::error_handler::{classify_graphql_errors, classify_status};
use crate::github::models::{GraphQlResponse, UserData};

/// Settings for a `GitHubClient`
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token, if one is configured
    pub token: Option<SecretString>,
    /// REST base URL without trailing slash
    pub api_url: String,
    /// GraphQL endpoint
    pub graphql_url: String,
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for a REST base URL; GraphQL lives at `<api_url>/graphql`
    pub fn new(api_url: &str, token: Option<SecretString>) -> Self {
        let api_url = api_url.trim_end_matches('/').to_string();
        Self {
            graphql_url: format!("{}/graphql", api_url),
            api_url,
            token,
            user_agent: format!("ghfetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, None)
    }
}

/// GitHub API client
///
/// Requests are issued one at a time; there is no retry.
pub struct GitHubClient {
    http: Client,
    config: ClientConfig,
}

impl GitHubClient {
    /// Create a new client from explicit configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { http, config })
    }

    /// Whether requests carry a token
    pub fn has_token(&self) -> bool {
        self.config.token.is_some()
    }

    /// Build a REST URL from a path like `/users/octocat`
    pub(crate) fn rest_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        match &self.config.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// GET a REST path and hand back the raw successful response
    ///
    /// Non-success statuses are classified against `username`.
    pub(crate) async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        username: &str,
    ) -> Result<Response> {
        let url = self.rest_url(path);
        tracing::debug!(%url, "GET");

        let response = self
            .authorize(self.http.get(&url).query(query))
            .send()
            .await?;

        ensure_success(response, username)
    }

    /// GET a REST path and decode the JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        username: &str,
    ) -> Result<(T, HeaderMap)> {
        let response = self.get(path, query, username).await?;
        let headers = response.headers().clone();
        let body = response.json::<T>().await?;
        Ok((body, headers))
    }

    /// Run a GraphQL query scoped to `user(login: $login)`
    ///
    /// Returns `None` when GitHub answered without a user object.
    pub(crate) async fn graphql_user<V, T>(
        &self,
        query: &str,
        variables: &V,
        username: &str,
    ) -> Result<Option<T>>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        if !self.has_token() {
            return Err(GhfetchError::TokenMissing);
        }

        tracing::debug!(url = %self.config.graphql_url, "POST graphql");

        let body = serde_json::json!({ "query": query, "variables": variables });
        let response = self
            .authorize(self.http.post(&self.config.graphql_url))
            .json(&body)
            .send()
            .await?;

        let response = ensure_success(response, username)?;
        let parsed: GraphQlResponse<UserData<T>> = response.json().await?;

        if !parsed.errors.is_empty() {
            return Err(classify_graphql_errors(&parsed.errors, username));
        }

        Ok(parsed.data.and_then(|d| d.user))
    }

    /// Download an arbitrary URL (used for avatars)
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(%url, "download");
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(GhfetchError::Network(format!(
                "download of {} returned HTTP {}",
                url,
                response.status().as_u16()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

fn ensure_success(response: Response, username: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::debug!(status = status.as_u16(), "request failed");
        Err(classify_status(status, response.headers(), username))
    }
}
