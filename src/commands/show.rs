//! # Show Command Implementation
//!
//! This module implements the `show` subcommand, which prints where an
//! installed repository lives, where it was cloned from, and when its most
//! recent commit was made.

use anyhow::Result;
use clap::Args;

use plugin_repos::cache::{Registry, RepositoryCache};
use plugin_repos::suggestions;

use super::format_timestamp;

/// Show details about an installed repository
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Name of the repository
    pub name: String,
}

/// Execute the `show` command.
pub fn execute(cache: &RepositoryCache, args: ShowArgs) -> Result<()> {
    let repository = cache
        .get(&args.name)
        .map_err(|e| suggestions::with_hints(e, cache))?;

    let url = repository
        .url()
        .map_err(|e| suggestions::with_hints(e, cache))?;
    let last_updated = repository
        .last_updated_at()
        .map_err(|e| suggestions::with_hints(e, cache))?;

    println!("Name:         {}", repository);
    println!("Path:         {}", repository.path().display());
    println!("URL:          {}", url);
    println!("Last updated: {}", format_timestamp(last_updated));
    Ok(())
}
