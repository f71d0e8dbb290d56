//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use plugin_repos::cache::RepositoryCache;
use plugin_repos::defaults;
use plugin_repos::git::Git;

use crate::commands;

/// Plugin Repositories - Install and manage git repositories of plugin content
#[derive(Parser, Debug)]
#[command(name = "plugin-repos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// The root directory for the repository cache.
    ///
    /// If not provided, it defaults to the system's cache directory
    /// (e.g., `~/.cache/plugin-repos` on Linux).
    #[arg(long, global = true, value_name = "DIR", env = "PLUGIN_REPOS_CACHE")]
    cache_root: Option<PathBuf>,

    /// The git executable to run
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "PLUGIN_REPOS_GIT",
        default_value = "git"
    )]
    git: PathBuf,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install a repository into the cache
    Install(commands::install::InstallArgs),
    /// Update one or all installed repositories
    Update(commands::update::UpdateArgs),
    /// Remove an installed repository
    #[command(alias = "rm")]
    Remove(commands::remove::RemoveArgs),
    /// List installed repositories
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
    /// Show details about an installed repository
    Show(commands::show::ShowArgs),
    /// Remove every installed repository
    Purge(commands::purge::PurgeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let cache_root = self
            .cache_root
            .unwrap_or_else(defaults::default_cache_root);
        let git = Git::default().with_program(self.git);
        let mut cache = RepositoryCache::with_git(cache_root, git);

        match self.command {
            Commands::Install(args) => commands::install::execute(&mut cache, args),
            Commands::Update(args) => commands::update::execute(&mut cache, args),
            Commands::Remove(args) => commands::remove::execute(&mut cache, args),
            Commands::List(args) => commands::list::execute(&cache, args),
            Commands::Show(args) => commands::show::execute(&cache, args),
            Commands::Purge(args) => commands::purge::execute(&mut cache, args),
        }
    }
}

/// Route `log` output to stderr. `RUST_LOG` wins over `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when embedded in tests.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
