//! Raw GraphQL response shapes.
//!
//! These mirror the selections made by [`super::query`] field for field, so
//! they serialize back to the same camelCase JSON GitHub sent. Absent or null
//! fields fall back to defaults instead of failing the whole page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GraphQL connection (`{ edges: [{ node }] }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    /// Iterate over the nodes of this connection.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }
}

impl<T> FromIterator<T> for Connection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().map(Edge::new).collect(),
        }
    }
}

/// A connection edge. Only paginated listings carry a cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl<T> Edge<T> {
    pub fn new(node: T) -> Self {
        Self { node, cursor: None }
    }
}

/// A direct collaborator of a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collaborator {
    pub login: String,
    pub name: Option<String>,
}

/// A git blob looked up by expression (`HEAD:README.md`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blob {
    pub text: Option<String>,
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleaseAsset {
    pub name: String,
    pub content_type: String,
    pub download_url: String,
    pub download_count: u64,
    pub size: u64,
}

/// A release as returned by GitHub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRelease {
    pub name: Option<String>,
    pub url: String,
    pub is_draft: bool,
    pub description: Option<String>,
    #[serde(rename = "descriptionHTML")]
    pub description_html: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub tag_name: String,
    pub is_prerelease: bool,
    /// Only selected on `releases`, not on `latestRelease`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_latest: Option<bool>,
    pub release_assets: Connection<ReleaseAsset>,
}

/// A repository as returned by GitHub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRepository {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub homepage_url: Option<String>,
    /// Null when the token cannot see collaborators.
    pub collaborators: Option<Connection<Collaborator>>,
    pub readme: Option<Blob>,
    pub module_json: Option<Blob>,
    pub latest_release: Option<RawRelease>,
    pub releases: Connection<RawRelease>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub stargazer_count: u64,
}

impl RawRepository {
    /// Direct collaborators, in the order GitHub returned them.
    pub fn collaborators(&self) -> impl Iterator<Item = &Collaborator> {
        self.collaborators.iter().flat_map(Connection::nodes)
    }

    /// Text of `README.md` at HEAD, if it exists and is not binary.
    pub fn readme_text(&self) -> Option<&str> {
        self.readme.as_ref().and_then(|blob| blob.text.as_deref())
    }

    /// Text of `module.json` at HEAD, if it exists and is not binary.
    pub fn module_json_text(&self) -> Option<&str> {
        self.module_json.as_ref().and_then(|blob| blob.text.as_deref())
    }
}

/// Cursor state of a paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One page of an organization's repositories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryConnection {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<RawRepository>>,
    pub page_info: PageInfo,
    pub total_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub repositories: RepositoryConnection,
}

/// `data` of the organization listing query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoriesPage {
    pub organization: Option<Organization>,
}

/// `data` of the single repository query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryLookup {
    pub repository: Option<RawRepository>,
}

/// One aliased entry of the star count query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StarCount {
    pub stargazer_count: u64,
}
