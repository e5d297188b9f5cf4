//! The persisted module record.
//!
//! Field names follow the JSON schema the registry site reads, so every type
//! here serializes with camelCase keys.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::consts::EPOCH;
use super::source::SourceRepo;
use crate::github::ReleaseAsset;

/// A module author shown on the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub link: String,
}

impl Author {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }
}

/// Older caches stored GitHub's nullable release fields as they came.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A qualifying release of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRelease {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    pub url: String,
    #[serde(rename = "descriptionHTML", default, deserialize_with = "null_as_empty")]
    pub description_html: String,
    pub created_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub tag_name: String,
    pub is_prerelease: bool,
    pub release_assets: Vec<ReleaseAsset>,
}

/// A registry module, one per organization repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub module_id: String,
    pub module_name: String,
    pub url: String,
    pub homepage_url: Option<String>,
    pub authors: Vec<Author>,
    /// Name of the latest stable release.
    pub latest_release: Option<String>,
    #[serde(default)]
    pub latest_release_tag: Option<String>,
    #[serde(default)]
    pub latest_beta_release_tag: Option<String>,
    #[serde(default)]
    pub latest_snapshot_release_tag: Option<String>,
    pub latest_release_time: DateTime<Utc>,
    pub latest_beta_release_time: DateTime<Utc>,
    pub latest_snapshot_release_time: DateTime<Utc>,
    pub releases: Vec<ModuleRelease>,
    pub readme: Option<String>,
    #[serde(rename = "readmeHTML")]
    pub readme_html: Option<String>,
    pub summary: Option<String>,
    pub source_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub stargazer_count: u64,
}

impl Module {
    /// Most recent of the stable, beta and snapshot release times.
    pub fn recency(&self) -> DateTime<Utc> {
        self.latest_release_time
            .max(self.latest_beta_release_time)
            .max(self.latest_snapshot_release_time)
            .max(EPOCH)
    }

    /// The upstream repository named by `sourceUrl`, unless it is this
    /// module's own repository in `org`.
    pub fn upstream_source(&self, org: &str) -> Option<SourceRepo> {
        let source = SourceRepo::from_source_url(self.source_url.as_deref()?)?;
        (!source.is_repo(org, &self.module_id)).then_some(source)
    }

    /// Adopt `stars` if it is higher than the current count.
    ///
    /// Returns true when the count changed.
    pub fn raise_stars(&mut self, stars: u64) -> bool {
        if stars > self.stargazer_count {
            self.stargazer_count = stars;
            true
        } else {
            false
        }
    }
}

/// Sort modules so the most recently released come first.
///
/// The sort is stable: modules with equal recency keep their order.
pub fn sort_by_recency(modules: &mut [Module]) {
    modules.sort_by_key(|module| Reverse(module.recency()));
}
