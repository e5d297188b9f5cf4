//! modsync CLI - refreshes the module registry cache.

mod commands;
mod config;
mod progress;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::fetch::FetchArgs;

#[derive(Parser)]
#[command(name = "modsync")]
#[command(version)]
#[command(about = "Fetch a module organization from GitHub into a JSON cache")]
#[command(
    long_about = "modsync pulls every repository of a module organization from GitHub's \
GraphQL API, keeps the ones that publish installable releases and writes them to a \
JSON cache that the registry site is built from. Naming a single module refreshes \
just that entry."
)]
#[command(after_long_help = r#"EXAMPLES
    Refresh the whole registry:
        $ modsync fetch

    Refresh one module after a release:
        $ modsync fetch --repo KernelSU-Modules-Repo/my-module

    Generate shell completions:
        $ modsync completions bash > ~/.local/share/bash-completion/completions/modsync

CONFIGURATION
    modsync reads configuration from:
      1. ~/.config/modsync/config.toml (or $XDG_CONFIG_HOME/modsync/config.toml)
      2. ./modsync.toml
      3. Environment variables (MODSYNC_* prefix, e.g., MODSYNC_GITHUB_TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    MODSYNC_GITHUB_TOKEN      GitHub token (GRAPHQL_TOKEN is also read)
    MODSYNC_GITHUB_URL        GitHub API base URL (default: https://api.github.com)
    MODSYNC_REGISTRY_ORG      Organization to fetch (default: KernelSU-Modules-Repo)
    MODSYNC_REGISTRY_TARGET   Module to refresh (REPO is also read)
    MODSYNC_CACHE_DIR         Cache directory (default: .cache)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch modules into the cache (the default command)
    Fetch(FetchArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
        /// Directory to write the script into (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("modsync=info,modsync_cli=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell, output }) => {
            commands::meta::handle_completions(shell, output)
        }
        Some(Commands::Man { output }) => commands::meta::handle_man(output),
        Some(Commands::Fetch(args)) => commands::fetch::handle_fetch(args).await,
        None => commands::fetch::handle_fetch(FetchArgs::default()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
