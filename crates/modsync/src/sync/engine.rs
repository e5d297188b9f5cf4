//! The sync driver.
//!
//! A run is either a full refresh of the organization or an incremental
//! refresh of one module. Requests are issued one at a time. Both cache files
//! are only written once everything they contain has been computed, so a
//! failed run leaves the previous cache in place.

use std::slice;

use super::error::SyncError;
use super::progress::{ProgressCallback, SyncProgress, emit};
use super::star::raise_upstream_stars;
use super::types::{SyncMode, SyncOptions, SyncOutcome};
use crate::cache::{MODULES_CACHE_FILE, ModuleCache, RAW_CACHE_FILE};
use crate::github::{Edge, GraphQlApi, RawRepository};
use crate::module::{Module, sort_by_recency, to_module};

/// Pick the mode for a run.
///
/// Incremental only when a target module is named and there is a module list
/// to update.
pub fn select_mode(options: &SyncOptions, cache: &ModuleCache) -> SyncMode {
    if options.target_module().is_some() && cache.modules_path().is_file() {
        SyncMode::Incremental
    } else {
        SyncMode::Full
    }
}

/// Refresh the cache, incrementally when possible.
pub async fn run<C: GraphQlApi + ?Sized>(
    client: &C,
    cache: &ModuleCache,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncOutcome, SyncError> {
    cache.ensure_dir()?;

    let mode = select_mode(options, cache);
    emit(
        on_progress,
        SyncProgress::Started {
            mode,
            org: options.org.clone(),
        },
    );

    match (mode, options.target_module()) {
        (SyncMode::Incremental, Some(name)) => {
            sync_module(client, cache, options, name, on_progress).await
        }
        _ => {
            if let Some(name) = options.target_module() {
                tracing::info!(module = name, "No module cache yet, running a full fetch");
            }
            sync_all(client, cache, options, on_progress).await
        }
    }
}

/// Refetch every repository of the organization and rewrite both cache files.
pub async fn sync_all<C: GraphQlApi + ?Sized>(
    client: &C,
    cache: &ModuleCache,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncOutcome, SyncError> {
    let edges = fetch_all_repositories(client, &options.org, on_progress).await?;
    cache.save_raw(&edges)?;
    emit(
        on_progress,
        SyncProgress::Saved {
            file: RAW_CACHE_FILE.to_string(),
            count: edges.len(),
        },
    );

    let mut modules: Vec<Module> = edges.iter().filter_map(|edge| to_module(&edge.node)).collect();
    sort_by_recency(&mut modules);
    emit(
        on_progress,
        SyncProgress::ModulesReady {
            modules: modules.len(),
            skipped: edges.len() - modules.len(),
        },
    );

    let stars_raised = raise_upstream_stars(
        client,
        &mut modules,
        &options.org,
        options.star_batch_size,
        on_progress,
    )
    .await;

    save_modules(cache, &modules, on_progress)?;

    Ok(SyncOutcome::Full {
        repositories: edges.len(),
        modules: modules.len(),
        stars_raised,
    })
}

/// Refetch one repository and replace its entry in the module list.
///
/// Fails with [`SyncError::RepositoryNotFound`] without touching the cache
/// when the organization has no repository called `name`.
pub async fn sync_module<C: GraphQlApi + ?Sized>(
    client: &C,
    cache: &ModuleCache,
    options: &SyncOptions,
    name: &str,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncOutcome, SyncError> {
    emit(
        on_progress,
        SyncProgress::FetchingRepository {
            org: options.org.clone(),
            name: name.to_string(),
        },
    );

    let repo = client
        .get_repository(&options.org, name)
        .await?
        .ok_or_else(|| SyncError::RepositoryNotFound(format!("{}/{name}", options.org)))?;

    let Some(mut module) = to_module(&repo) else {
        emit(
            on_progress,
            SyncProgress::ModuleSkipped {
                module_id: repo.name.clone(),
            },
        );
        return Ok(SyncOutcome::Skipped {
            module_id: repo.name,
        });
    };

    let mut modules = cache.load_modules()?;
    modules.retain(|existing| existing.module_id != module.module_id);

    raise_upstream_stars(
        client,
        slice::from_mut(&mut module),
        &options.org,
        options.star_batch_size,
        on_progress,
    )
    .await;

    let module_id = module.module_id.clone();
    modules.insert(0, module);
    sort_by_recency(&mut modules);
    emit(
        on_progress,
        SyncProgress::ModuleUpdated {
            module_id: module_id.clone(),
        },
    );

    save_modules(cache, &modules, on_progress)?;

    Ok(SyncOutcome::Updated {
        module_id,
        modules: modules.len(),
    })
}

/// Page through the organization's repositories.
async fn fetch_all_repositories<C: GraphQlApi + ?Sized>(
    client: &C,
    org: &str,
    on_progress: Option<&ProgressCallback>,
) -> Result<Vec<Edge<RawRepository>>, SyncError> {
    let mut edges = Vec::new();
    let mut cursor: Option<String> = None;
    let mut page = 0u32;

    loop {
        let connection = client.list_repositories_page(org, cursor.as_deref()).await?;
        page += 1;

        let count = connection.edges.len();
        edges.extend(connection.edges);
        emit(
            on_progress,
            SyncProgress::FetchedPage {
                page,
                count,
                total_so_far: edges.len(),
                total_repos: connection.total_count,
            },
        );

        if !connection.page_info.has_next_page {
            break;
        }
        match connection.page_info.end_cursor {
            Some(next) => cursor = Some(next),
            None => {
                tracing::warn!(page, "More pages reported without a cursor, stopping");
                break;
            }
        }
    }

    emit(on_progress, SyncProgress::FetchComplete { total: edges.len() });
    Ok(edges)
}

fn save_modules(
    cache: &ModuleCache,
    modules: &[Module],
    on_progress: Option<&ProgressCallback>,
) -> Result<(), SyncError> {
    cache.save_modules(modules)?;
    emit(
        on_progress,
        SyncProgress::Saved {
            file: MODULES_CACHE_FILE.to_string(),
            count: modules.len(),
        },
    );
    Ok(())
}
