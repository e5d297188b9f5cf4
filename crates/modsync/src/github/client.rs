//! GitHub GraphQL client.

use std::collections::HashMap;

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::GitHubError;
use super::query;
use super::types::{RawRepository, RepositoriesPage, RepositoryConnection, RepositoryLookup, StarCount};
use crate::module::SourceRepo;

/// Base URL of the public GitHub API. GraphQL requests go to `<base>/graphql`.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorMessage {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// The GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default = "Vec::new")]
    pub errors: Vec<GraphQlErrorMessage>,
}

impl<T> GraphQlResponse<T> {
    /// Unwrap the `data` member.
    ///
    /// GitHub answers lookups of missing repositories with a `null` entry in
    /// `data` plus an error, so errors next to data are logged and the data is
    /// kept. Only a response without data is an error.
    pub fn into_data(self) -> Result<T, GitHubError> {
        for error in &self.errors {
            tracing::warn!(
                kind = error.kind.as_deref().unwrap_or("unknown"),
                message = %error.message,
                "GraphQL error"
            );
        }

        match self.data {
            Some(data) => Ok(data),
            None if self.errors.is_empty() => {
                Err(GitHubError::GraphQl("response carried no data".to_string()))
            }
            None => Err(GitHubError::graphql(
                self.errors.iter().map(|e| e.message.as_str()),
            )),
        }
    }
}

fn decode<T: DeserializeOwned>(data: Value) -> Result<T, GitHubError> {
    Ok(serde_json::from_value(data)?)
}

/// Query access to the GitHub GraphQL API.
///
/// Implementors only provide [`execute`](GraphQlApi::execute); the typed
/// lookups used by the sync driver are built on top of it.
#[async_trait]
pub trait GraphQlApi: Send + Sync {
    /// Run a query and return the `data` member of the response.
    async fn execute(&self, query: &str) -> Result<Value, GitHubError>;

    /// Fetch one page of the organization's public repositories.
    async fn list_repositories_page(
        &self,
        org: &str,
        cursor: Option<&str>,
    ) -> Result<RepositoryConnection, GitHubError> {
        let data = self.execute(&query::repositories_query(org, cursor)).await?;
        let page: RepositoriesPage = decode(data)?;
        page.organization
            .map(|organization| organization.repositories)
            .ok_or_else(|| GitHubError::OrgNotFound(org.to_string()))
    }

    /// Look up a single repository of the organization.
    ///
    /// Returns `Ok(None)` when GitHub has no such repository.
    async fn get_repository(
        &self,
        org: &str,
        name: &str,
    ) -> Result<Option<RawRepository>, GitHubError> {
        let data = self.execute(&query::repository_query(org, name)).await?;
        let lookup: RepositoryLookup = decode(data)?;
        Ok(lookup.repository)
    }

    /// Look up star counts for a batch of repositories.
    ///
    /// The result has one entry per input, in input order; repositories
    /// GitHub could not resolve are `None`.
    async fn get_star_counts(
        &self,
        repos: &[SourceRepo],
    ) -> Result<Vec<Option<u64>>, GitHubError> {
        if repos.is_empty() {
            return Ok(Vec::new());
        }

        let data = self.execute(&query::star_count_query(repos)).await?;
        let mut counts: HashMap<String, Option<StarCount>> = decode(data)?;

        Ok((0..repos.len())
            .map(|index| {
                counts
                    .remove(&query::star_alias(index))
                    .flatten()
                    .map(|count| count.stargazer_count)
            })
            .collect())
    }
}

/// GitHub GraphQL client authenticated with a personal access token.
#[derive(Clone)]
pub struct GitHubClient {
    inner: Octocrab,
}

impl GitHubClient {
    /// Create a client for the public GitHub API.
    pub fn new(token: &str) -> Result<Self, GitHubError> {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Create a client for a specific API base URL (GitHub Enterprise).
    pub fn with_api_url(token: &str, api_url: &str) -> Result<Self, GitHubError> {
        if token.trim().is_empty() {
            return Err(GitHubError::AuthRequired);
        }

        let inner = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_url)?
            .build()?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl GraphQlApi for GitHubClient {
    async fn execute(&self, query: &str) -> Result<Value, GitHubError> {
        let payload = serde_json::json!({ "query": query });
        let response: GraphQlResponse<Value> = self.inner.graphql(&payload).await?;
        response.into_data()
    }
}

// ---------- Test-only scripted client ----------

#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::sync::{Arc, Mutex};

/// In-memory GraphQL client.
///
/// Responses are handed out in FIFO order regardless of the query, and every
/// query is recorded for later inspection.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct MockGraphQl {
    inner: Arc<Mutex<MockGraphQlInner>>,
}

#[cfg(test)]
#[derive(Default)]
struct MockGraphQlInner {
    responses: VecDeque<Result<Value, GitHubError>>,
    queries: Vec<String>,
}

#[cfg(test)]
impl MockGraphQl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response carrying `data`.
    pub(crate) fn push_data(&self, data: Value) {
        self.lock().responses.push_back(Ok(data));
    }

    /// Queue a failed response.
    pub(crate) fn push_error(&self, error: GitHubError) {
        self.lock().responses.push_back(Err(error));
    }

    /// Every query executed so far.
    pub(crate) fn queries(&self) -> Vec<String> {
        self.lock().queries.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockGraphQlInner> {
        self.inner
            .lock()
            .expect("mock client lock should not be poisoned")
    }
}

#[cfg(test)]
#[async_trait]
impl GraphQlApi for MockGraphQl {
    async fn execute(&self, query: &str) -> Result<Value, GitHubError> {
        let mut inner = self.lock();
        inner.queries.push(query.to_string());
        inner
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(GitHubError::GraphQl("no mock response registered".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_data_keeps_data_next_to_errors() {
        let response: GraphQlResponse<Value> = serde_json::from_value(json!({
            "data": { "repository": null },
            "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a Repository" }]
        }))
        .unwrap();
        let data = response.into_data().unwrap();
        assert!(data["repository"].is_null());
    }

    #[test]
    fn test_into_data_without_data_is_error() {
        let response: GraphQlResponse<Value> = serde_json::from_value(json!({
            "data": null,
            "errors": [{ "message": "Bad credentials" }]
        }))
        .unwrap();
        let err = response.into_data().unwrap_err();
        assert!(matches!(err, GitHubError::GraphQl(ref m) if m == "Bad credentials"));
    }

    #[test]
    fn test_into_data_empty_envelope_is_error() {
        let response: GraphQlResponse<Value> = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_data().is_err());
    }

    #[test]
    fn test_client_rejects_empty_token() {
        assert!(matches!(
            GitHubClient::new("  "),
            Err(GitHubError::AuthRequired)
        ));
    }

    #[tokio::test]
    async fn test_client_builds_with_token() {
        assert!(GitHubClient::new("ghp_test").is_ok());
        assert!(GitHubClient::with_api_url("ghp_test", "https://ghe.example.com/api").is_ok());
    }

    #[tokio::test]
    async fn test_list_repositories_page_unwraps_organization() {
        let mock = MockGraphQl::new();
        mock.push_data(json!({
            "organization": { "repositories": {
                "edges": [{ "node": { "name": "a" }, "cursor": "c1" }],
                "pageInfo": { "hasNextPage": false, "endCursor": "c1" },
                "totalCount": 1
            }}
        }));

        let page = mock.list_repositories_page("org", None).await.unwrap();
        assert_eq!(page.edges.len(), 1);
        assert!(!page.page_info.has_next_page);
        assert!(mock.queries()[0].contains(r#"organization(login: "org")"#));
    }

    #[tokio::test]
    async fn test_list_repositories_page_missing_org() {
        let mock = MockGraphQl::new();
        mock.push_data(json!({ "organization": null }));
        let err = mock.list_repositories_page("ghost", None).await.unwrap_err();
        assert!(matches!(err, GitHubError::OrgNotFound(ref org) if org == "ghost"));
    }

    #[tokio::test]
    async fn test_get_repository_not_found_is_none() {
        let mock = MockGraphQl::new();
        mock.push_data(json!({ "repository": null }));
        assert!(mock.get_repository("org", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_star_counts_matches_aliases_by_index() {
        let mock = MockGraphQl::new();
        mock.push_data(json!({
            "repo1": { "stargazerCount": 5 },
            "repo0": { "stargazerCount": 120 },
            "repo2": null
        }));

        let repos = vec![
            SourceRepo::new("a", "one"),
            SourceRepo::new("b", "two"),
            SourceRepo::new("c", "gone"),
        ];
        let counts = mock.get_star_counts(&repos).await.unwrap();
        assert_eq!(counts, vec![Some(120), Some(5), None]);
    }

    #[tokio::test]
    async fn test_get_star_counts_empty_batch_skips_request() {
        let mock = MockGraphQl::new();
        let counts = mock.get_star_counts(&[]).await.unwrap();
        assert!(counts.is_empty());
        assert!(mock.queries().is_empty());
    }
}
