use std::path::PathBuf;

use modsync::ModuleCache;
use modsync::github::GitHubClient;
use modsync::sync::{self, SyncOptions};

use crate::config::Config;
use crate::progress::LoggingReporter;

/// Options for `modsync fetch`.
#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct FetchArgs {
    /// Refresh only this module (`owner/name` or `name`); needs an existing cache
    #[arg(short, long)]
    pub repo: Option<String>,

    /// Organization to fetch (default from config or KernelSU-Modules-Repo)
    #[arg(short, long)]
    pub org: Option<String>,

    /// Cache directory (default from config or .cache)
    #[arg(short = 'C', long)]
    pub cache_dir: Option<PathBuf>,
}

impl FetchArgs {
    fn sync_options(&self, config: &Config) -> SyncOptions {
        let mut options = config.sync_options();
        if let Some(org) = &self.org {
            options.org = org.clone();
        }
        if let Some(repo) = &self.repo {
            options.target = Some(repo.clone());
        }
        options
    }

    fn cache_dir(&self, config: &Config) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| config.cache.dir.clone())
    }
}

pub(crate) async fn handle_fetch(args: FetchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let token = config.github_token()?;

    let options = args.sync_options(&config);
    let cache = ModuleCache::new(args.cache_dir(&config));
    let client = GitHubClient::with_api_url(token, &config.github.url)?;
    let on_progress = LoggingReporter::new().into_callback();

    let outcome = sync::run(&client, &cache, &options, Some(&on_progress)).await?;
    tracing::info!(
        mode = %outcome.mode(),
        cache = %cache.dir().display(),
        "Done: {outcome}"
    );
    Ok(())
}
