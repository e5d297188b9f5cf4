//! modsync - module registry fetcher.
//!
//! This library pulls the repositories of a module organization from GitHub's
//! GraphQL API, turns each one into a [`Module`] record and keeps the
//! registry's JSON cache up to date.
//!
//! # Example
//!
//! ```ignore
//! use modsync::cache::ModuleCache;
//! use modsync::github::GitHubClient;
//! use modsync::sync::{SyncOptions, run};
//!
//! let client = GitHubClient::new(&token)?;
//! let cache = ModuleCache::new(".cache");
//! let outcome = run(&client, &cache, &SyncOptions::default(), None).await?;
//! ```

pub mod cache;
pub mod github;
pub mod module;
pub mod sync;

pub use cache::{CacheError, ModuleCache};
pub use github::{GitHubClient, GitHubError, GraphQlApi};
pub use module::{Author, Module, ModuleRelease, SourceRepo, to_module};
pub use sync::{SyncError, SyncMode, SyncOptions, SyncOutcome};
