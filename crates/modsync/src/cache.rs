//! On-disk JSON cache.
//!
//! Two files live in the cache directory:
//!
//! - `graphql.json`: the raw repository edges from the last full fetch,
//!   pretty-printed, wrapped as `{"repositories": [...]}`.
//! - `modules.json`: the normalized module list, compact.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::github::{Edge, RawRepository};
use crate::module::Module;

pub const RAW_CACHE_FILE: &str = "graphql.json";
pub const MODULES_CACHE_FILE: &str = "modules.json";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Deserialize)]
struct RawCache {
    repositories: Vec<Edge<RawRepository>>,
}

/// Handle on a cache directory.
#[derive(Debug, Clone)]
pub struct ModuleCache {
    dir: PathBuf,
}

impl ModuleCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn raw_path(&self) -> PathBuf {
        self.dir.join(RAW_CACHE_FILE)
    }

    pub fn modules_path(&self) -> PathBuf {
        self.dir.join(MODULES_CACHE_FILE)
    }

    /// Create the cache directory if it does not exist.
    pub fn ensure_dir(&self) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir).map_err(|e| CacheError::io(&self.dir, e))
    }

    /// Read the module list written by the last fetch.
    pub fn load_modules(&self) -> Result<Vec<Module>, CacheError> {
        let path = self.modules_path();
        let content = fs::read(&path).map_err(|e| CacheError::io(&path, e))?;
        serde_json::from_slice(&content).map_err(|e| CacheError::json(&path, e))
    }

    /// Replace `modules.json`.
    pub fn save_modules(&self, modules: &[Module]) -> Result<(), CacheError> {
        let path = self.modules_path();
        let content = serde_json::to_vec(modules).map_err(|e| CacheError::json(&path, e))?;
        write_atomic(&path, &content)?;
        tracing::debug!(path = %path.display(), modules = modules.len(), "Saved module cache");
        Ok(())
    }

    /// Replace `graphql.json` with the given raw repository edges.
    pub fn save_raw(&self, repositories: &[Edge<RawRepository>]) -> Result<(), CacheError> {
        #[derive(Serialize)]
        struct RawCacheRef<'a> {
            repositories: &'a [Edge<RawRepository>],
        }

        let path = self.raw_path();
        let content = serde_json::to_vec_pretty(&RawCacheRef { repositories })
            .map_err(|e| CacheError::json(&path, e))?;
        write_atomic(&path, &content)?;
        tracing::debug!(
            path = %path.display(),
            repositories = repositories.len(),
            "Saved raw repository cache"
        );
        Ok(())
    }

    /// Read the raw repository edges written by the last full fetch.
    pub fn load_raw(&self) -> Result<Vec<Edge<RawRepository>>, CacheError> {
        let path = self.raw_path();
        let content = fs::read(&path).map_err(|e| CacheError::io(&path, e))?;
        let raw: RawCache =
            serde_json::from_slice(&content).map_err(|e| CacheError::json(&path, e))?;
        Ok(raw.repositories)
    }
}

/// Write to a sibling temp file, then rename over `path`.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), CacheError> {
    let temp_path = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&temp_path).map_err(|e| CacheError::io(&temp_path, e))?;
        file.write_all(content)
            .and_then(|()| file.flush())
            .map_err(|e| CacheError::io(&temp_path, e))?;
    }
    fs::rename(&temp_path, path).map_err(|e| CacheError::io(path, e))
}
