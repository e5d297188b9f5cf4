//! Sync types and constants.

use std::fmt;

/// Organization whose repositories make up the registry.
pub const DEFAULT_ORG: &str = "KernelSU-Modules-Repo";

/// Upstream repositories looked up per star count query.
pub const STAR_BATCH_SIZE: usize = 50;

/// How a run refreshes the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Refetch the whole organization and rewrite both cache files.
    Full,
    /// Refetch one repository and splice it into the existing module list.
    Incremental,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::Incremental => f.write_str("incremental"),
        }
    }
}

/// Options for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Organization login.
    pub org: String,
    /// Module to refresh. Accepts `owner/name` or a bare name.
    pub target: Option<String>,
    /// Upstream repositories per star count query.
    pub star_batch_size: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            org: DEFAULT_ORG.to_string(),
            target: None,
            star_batch_size: STAR_BATCH_SIZE,
        }
    }
}

impl SyncOptions {
    pub fn with_org(mut self, org: impl Into<String>) -> Self {
        self.org = org.into();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// The module id named by [`target`](Self::target), if any.
    pub fn target_module(&self) -> Option<&str> {
        self.target.as_deref().and_then(module_name_from_target)
    }
}

/// Extract the repository name from `owner/name` or a bare `name`.
///
/// Returns `None` for blank input.
pub fn module_name_from_target(target: &str) -> Option<&str> {
    let name = target.trim();
    let name = name.rsplit_once('/').map_or(name, |(_, name)| name).trim();
    (!name.is_empty()).then_some(name)
}

/// What a sync run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The whole organization was refetched.
    Full {
        repositories: usize,
        modules: usize,
        stars_raised: usize,
    },
    /// One module was refetched and written back into the list.
    Updated { module_id: String, modules: usize },
    /// The refetched repository is not a module; the cache is untouched.
    Skipped { module_id: String },
}

impl SyncOutcome {
    pub fn mode(&self) -> SyncMode {
        match self {
            Self::Full { .. } => SyncMode::Full,
            Self::Updated { .. } | Self::Skipped { .. } => SyncMode::Incremental,
        }
    }

    /// Number of modules in the cache after the run, if it was written.
    pub fn module_count(&self) -> Option<usize> {
        match self {
            Self::Full { modules, .. } | Self::Updated { modules, .. } => Some(*modules),
            Self::Skipped { .. } => None,
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full {
                repositories,
                modules,
                stars_raised,
            } => write!(
                f,
                "{modules} modules from {repositories} repositories ({stars_raised} star counts raised)"
            ),
            Self::Updated { module_id, modules } => {
                write!(f, "updated {module_id} ({modules} modules)")
            }
            Self::Skipped { module_id } => write!(f, "{module_id} is not a module, cache unchanged"),
        }
    }
}
