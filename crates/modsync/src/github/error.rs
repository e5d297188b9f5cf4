//! GitHub API error types.

use thiserror::Error;

/// Errors that can occur when talking to the GitHub GraphQL API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Unexpected GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Organization not found: {0}")]
    OrgNotFound(String),

    #[error("Authentication required")]
    AuthRequired,
}

impl GitHubError {
    /// Build a GraphQL error from the messages of an `errors` array.
    pub fn graphql<'a>(messages: impl IntoIterator<Item = &'a str>) -> Self {
        let joined = messages.into_iter().collect::<Vec<_>>().join("; ");
        Self::GraphQl(joined)
    }
}

/// Extract a short error message suitable for log lines.
///
/// Takes the first line of an error message, which keeps octocrab's
/// multi-line errors readable in structured logs.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}
