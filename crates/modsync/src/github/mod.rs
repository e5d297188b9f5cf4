//! GitHub GraphQL access for the registry organization.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - Raw GraphQL response shapes
//! - [`query`] - Query string builders
//! - [`client`] - Authenticated client and the [`GraphQlApi`] seam

mod client;
mod error;
pub mod query;
mod types;

pub use error::{GitHubError, short_error_message};

pub use types::{
    Blob, Collaborator, Connection, Edge, Organization, PageInfo, RawRelease, RawRepository,
    ReleaseAsset, RepositoriesPage, RepositoryConnection, RepositoryLookup, StarCount,
};

pub use client::{DEFAULT_API_URL, GitHubClient, GraphQlApi, GraphQlErrorMessage, GraphQlResponse};

#[cfg(test)]
pub(crate) use client::MockGraphQl;
