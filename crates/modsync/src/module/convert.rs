//! Raw repository to module conversion.

use chrono::{DateTime, Utc};

use super::authors::build_authors;
use super::consts::{
    EPOCH, EXCLUDED_MODULES, MODULE_ID_REGEX, RELEASE_TAG_REGEX, SNAPSHOT_NAME_REGEX,
    ZIP_CONTENT_TYPE,
};
use super::images::replace_private_images;
use super::markdown::render_markdown;
use super::metadata::ModuleMetadata;
use super::types::{Module, ModuleRelease};
use crate::github::{RawRelease, RawRepository};

/// Whether a repository name can be a module id.
pub fn is_valid_module_id(id: &str) -> bool {
    MODULE_ID_REGEX.is_match(id) && !EXCLUDED_MODULES.contains(&id)
}

/// Whether a release is published, follows the `<code>-<name>` tag scheme and
/// ships a zip.
pub fn is_qualifying_release(release: &RawRelease) -> bool {
    !release.is_draft
        && RELEASE_TAG_REGEX.is_match(&release.tag_name)
        && release
            .release_assets
            .nodes()
            .any(|asset| asset.content_type == ZIP_CONTENT_TYPE)
}

fn is_snapshot(release: &ModuleRelease) -> bool {
    release.is_prerelease && SNAPSHOT_NAME_REGEX.is_match(&release.name)
}

/// The repository's releases plus `latestRelease` when the listing missed it.
fn merged_releases(repo: &RawRepository) -> Vec<&RawRelease> {
    let mut releases: Vec<&RawRelease> = repo.releases.nodes().collect();
    if let Some(latest) = &repo.latest_release
        && !releases.iter().any(|r| r.tag_name == latest.tag_name)
    {
        releases.push(latest);
    }
    releases
}

fn to_module_release(release: &RawRelease) -> ModuleRelease {
    let name = release
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| release.tag_name.clone());

    ModuleRelease {
        name,
        url: release.url.clone(),
        description_html: replace_private_images(
            release.description.as_deref(),
            release.description_html.as_deref().unwrap_or_default(),
        ),
        created_at: release.created_at,
        published_at: release.published_at,
        updated_at: release.updated_at,
        tag_name: release.tag_name.clone(),
        is_prerelease: release.is_prerelease,
        release_assets: release.release_assets.nodes().cloned().collect(),
    }
}

/// The stable, beta and snapshot releases a module advertises.
///
/// A missing beta falls back to the stable release and a missing snapshot
/// falls back to the beta (which may itself be the stable release).
struct ReleasePointers<'a> {
    latest: Option<&'a ModuleRelease>,
    beta: Option<&'a ModuleRelease>,
    snapshot: Option<&'a ModuleRelease>,
}

impl<'a> ReleasePointers<'a> {
    fn resolve(releases: &'a [ModuleRelease]) -> Self {
        let latest = releases.iter().find(|r| !r.is_prerelease);
        let beta = releases
            .iter()
            .find(|r| r.is_prerelease && !is_snapshot(r))
            .or(latest);
        let snapshot = releases.iter().find(|r| is_snapshot(r)).or(beta);
        Self {
            latest,
            beta,
            snapshot,
        }
    }
}

fn published_or_epoch(release: Option<&ModuleRelease>) -> DateTime<Utc> {
    release.and_then(|r| r.published_at).unwrap_or(EPOCH)
}

fn tag_of(release: Option<&ModuleRelease>) -> Option<String> {
    release.map(|r| r.tag_name.clone())
}

fn parse_metadata(repo: &RawRepository) -> ModuleMetadata {
    let Some(text) = repo.module_json_text() else {
        return ModuleMetadata::default();
    };
    ModuleMetadata::parse(text).unwrap_or_else(|e| {
        tracing::warn!(module = %repo.name, error = %e, "Failed to parse module.json");
        ModuleMetadata::default()
    })
}

/// Convert a raw repository into a module record.
///
/// Returns `None` when the repository is not a module: its name is not a
/// valid module id or is reserved, it has no description, or none of its
/// releases qualify.
pub fn to_module(repo: &RawRepository) -> Option<Module> {
    let releases: Vec<ModuleRelease> = merged_releases(repo)
        .into_iter()
        .filter(|release| is_qualifying_release(release))
        .map(to_module_release)
        .collect();

    let description = repo.description.as_deref().filter(|d| !d.is_empty());
    let Some(description) = description.filter(|_| {
        is_valid_module_id(&repo.name) && !releases.is_empty()
    }) else {
        tracing::info!(repo = %repo.name, "Skipped repository");
        return None;
    };
    tracing::info!(module = %repo.name, releases = releases.len(), "Found module");

    let pointers = ReleasePointers::resolve(&releases);
    let latest_release = pointers.latest.map(|r| r.name.clone());
    let latest_release_tag = tag_of(pointers.latest);
    let latest_beta_release_tag = tag_of(pointers.beta);
    let latest_snapshot_release_tag = tag_of(pointers.snapshot);
    let latest_release_time = published_or_epoch(pointers.latest);
    let latest_beta_release_time = published_or_epoch(pointers.beta);
    let latest_snapshot_release_time = published_or_epoch(pointers.snapshot);

    let readme = repo
        .readme_text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(String::from);
    let readme_html = readme.as_deref().map(render_markdown);

    let metadata = parse_metadata(repo);
    let authors = build_authors(repo.collaborators(), &metadata.additional_authors);

    Some(Module {
        module_id: repo.name.clone(),
        module_name: description.to_string(),
        url: repo.url.clone(),
        homepage_url: repo.homepage_url.clone().filter(|url| !url.is_empty()),
        authors,
        latest_release,
        latest_release_tag,
        latest_beta_release_tag,
        latest_snapshot_release_tag,
        latest_release_time,
        latest_beta_release_time,
        latest_snapshot_release_time,
        releases,
        readme,
        readme_html,
        summary: metadata.summary,
        source_url: metadata.source_url,
        updated_at: repo.updated_at,
        created_at: repo.created_at,
        stargazer_count: repo.stargazer_count,
    })
}

/// Raw repository builders shared by tests across the crate.
#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Utc};

    use crate::github::{Blob, Collaborator, Connection, RawRelease, RawRepository, ReleaseAsset};

    pub(crate) const ORG: &str = "KernelSU-Modules-Repo";

    pub(crate) fn at(date: &str) -> DateTime<Utc> {
        format!("{date}T00:00:00Z")
            .parse()
            .expect("fixture date should parse")
    }

    pub(crate) fn asset(name: &str, content_type: &str) -> ReleaseAsset {
        ReleaseAsset {
            name: name.to_string(),
            content_type: content_type.to_string(),
            download_url: format!("https://github.com/{ORG}/releases/download/{name}"),
            download_count: 10,
            size: 2048,
        }
    }

    pub(crate) fn release(tag: &str, name: &str, prerelease: bool, published: &str) -> RawRelease {
        RawRelease {
            name: Some(name.to_string()),
            url: format!("https://github.com/{ORG}/releases/tag/{tag}"),
            is_draft: false,
            description: Some(String::new()),
            description_html: Some(String::new()),
            created_at: Some(at(published)),
            published_at: Some(at(published)),
            updated_at: Some(at(published)),
            tag_name: tag.to_string(),
            is_prerelease: prerelease,
            is_latest: Some(false),
            release_assets: [asset("module.zip", "application/zip")].into_iter().collect(),
        }
    }

    pub(crate) fn repository(name: &str, releases: Vec<RawRelease>) -> RawRepository {
        RawRepository {
            name: name.to_string(),
            description: Some(format!("{name} description")),
            url: format!("https://github.com/{ORG}/{name}"),
            homepage_url: None,
            collaborators: Some(
                [Collaborator {
                    login: "owner".to_string(),
                    name: Some("Owner".to_string()),
                }]
                .into_iter()
                .collect(),
            ),
            readme: None,
            module_json: None,
            latest_release: None,
            releases: releases.into_iter().collect::<Connection<_>>(),
            updated_at: Some(at("2024-01-01")),
            created_at: Some(at("2023-01-01")),
            stargazer_count: 1,
        }
    }

    pub(crate) fn with_module_json(mut repo: RawRepository, text: &str) -> RawRepository {
        repo.module_json = Some(Blob {
            text: Some(text.to_string()),
        });
        repo
    }
}
