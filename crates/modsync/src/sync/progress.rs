//! Progress reporting for sync runs.
//!
//! The driver reports what it is doing through these events; front ends
//! decide how to present them.

use super::types::SyncMode;

/// Progress events emitted during a sync run.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum SyncProgress {
    /// A run started.
    Started {
        mode: SyncMode,
        /// Organization login.
        org: String,
    },

    /// Fetched a page of the organization's repositories.
    FetchedPage {
        /// Page number (1-indexed).
        page: u32,
        /// Repositories on this page.
        count: usize,
        /// Running total of repositories fetched so far.
        total_so_far: usize,
        /// Repositories in the organization, as reported by GitHub.
        total_repos: u64,
    },

    /// Finished paging through the organization.
    FetchComplete {
        /// Repositories fetched.
        total: usize,
    },

    /// Converted raw repositories into module records.
    ModulesReady {
        /// Repositories that became modules.
        modules: usize,
        /// Repositories that were not modules.
        skipped: usize,
    },

    /// Looking up upstream star counts for one batch.
    FetchingStars {
        /// Batch number (1-indexed).
        batch: usize,
        /// Number of batches.
        batches: usize,
        /// Repositories in this batch.
        count: usize,
    },

    /// A star count lookup failed; the affected modules keep their counts.
    StarLookupFailed {
        batch: usize,
        batches: usize,
        error: String,
    },

    /// A module adopted its upstream repository's higher star count.
    StarsRaised {
        module_id: String,
        /// Upstream repository, `owner/name`.
        source: String,
        stars: u64,
    },

    /// Fetching one repository for an incremental run.
    FetchingRepository { org: String, name: String },

    /// The refetched module replaced its cache entry.
    ModuleUpdated { module_id: String },

    /// The refetched repository is not a module.
    ModuleSkipped { module_id: String },

    /// A cache file was written.
    Saved {
        /// File name within the cache directory.
        file: String,
        /// Entries written.
        count: usize,
    },
}

/// Callback for progress updates during sync operations.
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: SyncProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
