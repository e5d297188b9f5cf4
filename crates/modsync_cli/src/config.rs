//! Configuration file support for modsync.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `MODSYNC_`, e.g., `MODSYNC_GITHUB_TOKEN`)
//! 3. Config file (./modsync.toml, then ~/.config/modsync/config.toml)
//! 4. Legacy environment variables (`GRAPHQL_TOKEN`, `REPO`)
//! 5. Built-in defaults
//!
//! Keys contain no underscores so that `MODSYNC_<SECTION>_<KEY>` maps onto
//! `<section>.<key>`.
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."  # or use MODSYNC_GITHUB_TOKEN / GRAPHQL_TOKEN
//! url = "https://api.github.com"
//!
//! [registry]
//! org = "KernelSU-Modules-Repo"
//! target = "my-module"  # refresh one module; or use REPO
//!
//! [cache]
//! dir = ".cache"
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use modsync::github::DEFAULT_API_URL;
use modsync::sync::{DEFAULT_ORG, SyncOptions};
use serde::Deserialize;
use thiserror::Error;

/// Legacy variable holding the GitHub token.
pub const LEGACY_TOKEN_VAR: &str = "GRAPHQL_TOKEN";
/// Legacy variable naming the module to refresh.
pub const LEGACY_TARGET_VAR: &str = "REPO";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "GitHub token missing: set MODSYNC_GITHUB_TOKEN or GRAPHQL_TOKEN, or github.token in the config file"
    )]
    MissingToken,
}

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub registry: RegistryConfig,
    pub cache: CacheConfig,
}

/// GitHub configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Token used for GraphQL requests.
    pub token: Option<String>,
    /// API base URL; GraphQL requests go to `<url>/graphql`.
    pub url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Which organization to fetch and which module to refresh.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub org: String,
    /// `owner/name` or a bare module name.
    pub target: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            org: DEFAULT_ORG.to_string(),
            target: None,
        }
    }
}

/// Cache location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".cache"),
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/modsync/config.toml)
    /// 3. Local config file (./modsync.toml)
    /// 4. Environment variables with MODSYNC_ prefix
    ///
    /// Legacy variables then fill whatever is still unset.
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("modsync.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./modsync.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // e.g., MODSYNC_GITHUB_TOKEN -> github.token
        builder = builder.add_source(
            Environment::with_prefix("MODSYNC")
                .separator("_")
                .try_parsing(true),
        );

        let mut config = match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        };

        config.apply_legacy(|name| std::env::var(name).ok());
        config
    }

    /// Fill unset values from the legacy variables.
    fn apply_legacy(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if self.github.token.is_none() {
            self.github.token = present(LEGACY_TOKEN_VAR);
        }
        if self.registry.target.is_none() {
            self.registry.target = present(LEGACY_TARGET_VAR);
        }
    }

    /// The GitHub token, required before any request is made.
    pub fn github_token(&self) -> Result<&str, ConfigError> {
        self.github
            .token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)
    }

    /// Options for the sync driver.
    pub fn sync_options(&self) -> SyncOptions {
        let options = SyncOptions::default().with_org(self.registry.org.clone());
        match &self.registry.target {
            Some(target) => options.with_target(target.clone()),
            None => options,
        }
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "modsync").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_toml(toml_content: &str) -> Config {
        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();
        settings.try_deserialize().unwrap()
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github.token.is_none());
        assert_eq!(config.github.url, "https://api.github.com");
        assert_eq!(config.registry.org, "KernelSU-Modules-Repo");
        assert!(config.registry.target.is_none());
        assert_eq!(config.cache.dir, PathBuf::from(".cache"));
    }

    #[test]
    fn test_config_builder_with_toml_string() {
        let config = from_toml(
            r#"
            [github]
            token = "ghp_test123"
            url = "https://ghe.example.com/api"

            [registry]
            org = "Other-Org"
            target = "Other-Org/foo"

            [cache]
            dir = "/tmp/modsync"
        "#,
        );

        assert_eq!(config.github_token().unwrap(), "ghp_test123");
        assert_eq!(config.github.url, "https://ghe.example.com/api");
        assert_eq!(config.registry.org, "Other-Org");
        assert_eq!(config.cache.dir, PathBuf::from("/tmp/modsync"));

        let options = config.sync_options();
        assert_eq!(options.org, "Other-Org");
        assert_eq!(options.target_module(), Some("foo"));
    }

    #[test]
    fn test_config_builder_partial_override() {
        let config = from_toml(
            r#"
            [cache]
            dir = "out"
        "#,
        );

        assert_eq!(config.cache.dir, PathBuf::from("out"));
        assert_eq!(config.registry.org, "KernelSU-Modules-Repo");
        assert_eq!(config.github.url, "https://api.github.com");
    }

    #[test]
    fn test_config_merging_order() {
        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(
                "[registry]\norg = \"Base\"\ntarget = \"foo\"",
                FileFormat::Toml,
            ))
            .add_source(config::File::from_str(
                "[registry]\norg = \"Override\"",
                FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(config.registry.org, "Override");
        assert_eq!(config.registry.target.as_deref(), Some("foo"));
    }

    #[test]
    fn test_config_invalid_toml() {
        let result = ConfigBuilder::builder()
            .add_source(config::File::from_str("[registry\norg = 1", FileFormat::Toml))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_legacy_variables_fill_unset_values() {
        let mut config = Config::default();
        config.apply_legacy(env(&[("GRAPHQL_TOKEN", "ghp_legacy"), ("REPO", "org/foo")]));

        assert_eq!(config.github_token().unwrap(), "ghp_legacy");
        assert_eq!(config.sync_options().target_module(), Some("foo"));
    }

    #[test]
    fn test_legacy_variables_do_not_override() {
        let mut config = from_toml(
            r#"
            [github]
            token = "ghp_config"
            [registry]
            target = "bar"
        "#,
        );
        config.apply_legacy(env(&[("GRAPHQL_TOKEN", "ghp_legacy"), ("REPO", "org/foo")]));

        assert_eq!(config.github_token().unwrap(), "ghp_config");
        assert_eq!(config.registry.target.as_deref(), Some("bar"));
    }

    #[test]
    fn test_blank_legacy_values_are_ignored() {
        let mut config = Config::default();
        config.apply_legacy(env(&[("GRAPHQL_TOKEN", " "), ("REPO", "")]));
        assert!(config.github.token.is_none());
        assert!(config.registry.target.is_none());
    }

    #[test]
    fn test_missing_token_is_error() {
        let mut config = Config::default();
        assert!(matches!(config.github_token(), Err(ConfigError::MissingToken)));

        config.github.token = Some("   ".to_string());
        assert!(matches!(config.github_token(), Err(ConfigError::MissingToken)));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path().unwrap();
        assert!(path.to_string_lossy().contains("modsync"));
        assert!(path.ends_with("config.toml"));
    }
}
