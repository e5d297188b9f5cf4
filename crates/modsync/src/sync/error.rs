use thiserror::Error;

use crate::cache::CacheError;
use crate::github::GitHubError;

/// Errors that abort a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),
}
