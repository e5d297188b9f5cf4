use modsync::sync::SyncProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: SyncProgress) {
        match event {
            SyncProgress::Started { mode, org } => {
                tracing::info!(mode = %mode, org = %org, "Starting fetch");
            }

            SyncProgress::FetchedPage {
                page,
                count,
                total_so_far,
                total_repos,
            } => {
                tracing::info!(page, count, total_so_far, total_repos, "Fetched page");
            }

            SyncProgress::FetchComplete { total } => {
                tracing::info!(total, "Fetch complete");
            }

            SyncProgress::ModulesReady { modules, skipped } => {
                tracing::info!(modules, skipped, "Modules ready");
            }

            SyncProgress::FetchingStars {
                batch,
                batches,
                count,
            } => {
                tracing::info!(count, "Fetching stars for batch {batch}/{batches}");
            }

            SyncProgress::StarLookupFailed {
                batch,
                batches,
                error,
            } => {
                tracing::debug!(batch, batches, error = %error, "Star batch skipped");
            }

            SyncProgress::StarsRaised {
                module_id,
                source,
                stars,
            } => {
                tracing::debug!(module = %module_id, source = %source, stars, "Adopted upstream stars");
            }

            SyncProgress::FetchingRepository { org, name } => {
                tracing::info!(repo = %format!("{}/{}", org, name), "Fetching repository");
            }

            SyncProgress::ModuleUpdated { module_id } => {
                tracing::info!(module = %module_id, "Updated module");
            }

            SyncProgress::ModuleSkipped { module_id } => {
                tracing::warn!(module = %module_id, "Repository is not a module, cache unchanged");
            }

            SyncProgress::Saved { file, count } => {
                tracing::info!(file = %file, count, "Saved");
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
