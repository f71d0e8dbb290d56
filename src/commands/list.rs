//! # List Command Implementation
//!
//! This module implements the `list` subcommand, which shows the
//! repositories installed in the cache.
//!
//! By default only names are printed, one per line, so the output can be
//! piped into other tools. `--detailed` adds the origin URL and last commit
//! time, and `--json` prints the same details as a JSON array.

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use clap::Args;
use log::warn;
use serde::Serialize;
use std::path::PathBuf;

use plugin_repos::cache::{Registry, RepositoryCache};
use plugin_repos::repository::Repository;

use super::format_timestamp;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show the origin URL and last commit time of each repository
    #[arg(long)]
    pub detailed: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Details of one installed repository.
#[derive(Debug, Serialize)]
struct RepositorySummary {
    name: String,
    path: PathBuf,
    url: Option<String>,
    last_updated: Option<DateTime<FixedOffset>>,
}

impl RepositorySummary {
    /// Query git for the details. A repository git cannot describe is still
    /// listed, with the missing details left empty.
    fn from_repository(repository: &Repository) -> Self {
        let url = repository
            .url()
            .map_err(|e| warn!("could not read origin of {}: {}", repository, e))
            .ok();
        let last_updated = repository
            .last_updated_at()
            .map_err(|e| warn!("could not read last commit of {}: {}", repository, e))
            .ok()
            .flatten();

        Self {
            name: repository.name().to_string(),
            path: repository.path().to_path_buf(),
            url,
            last_updated,
        }
    }
}

/// Execute the `list` command.
pub fn execute(cache: &RepositoryCache, args: ListArgs) -> Result<()> {
    let repositories = cache.repositories()?;

    if repositories.is_empty() {
        if args.json {
            println!("[]");
        } else if !cache.root().exists() {
            println!("Cache directory does not exist: {}", cache.root().display());
            println!("No repositories installed.");
        } else {
            println!("No repositories installed in: {}", cache.root().display());
        }
        return Ok(());
    }

    if args.json {
        let summaries: Vec<_> = repositories
            .iter()
            .map(RepositorySummary::from_repository)
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else if args.detailed {
        display_detailed(&repositories);
    } else {
        for repository in &repositories {
            println!("{}", repository);
        }
    }

    Ok(())
}

fn display_detailed(repositories: &[Repository]) {
    println!("Installed repositories:\n");
    for repository in repositories {
        let summary = RepositorySummary::from_repository(repository);
        println!("{}", summary.name);
        println!("  Path:         {}", summary.path.display());
        println!(
            "  URL:          {}",
            summary.url.as_deref().unwrap_or("unknown")
        );
        println!(
            "  Last updated: {}",
            format_timestamp(summary.last_updated)
        );
        println!();
    }
    println!("Total: {} repositories", repositories.len());
}
