//! # Remove Command Implementation
//!
//! This module implements the `remove` subcommand, which deletes one
//! installed repository from the cache.

use anyhow::Result;
use clap::Args;

use plugin_repos::cache::RepositoryCache;
use plugin_repos::suggestions;

/// Remove an installed repository
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Name of the repository to remove
    pub name: String,
}

/// Execute the `remove` command.
pub fn execute(cache: &mut RepositoryCache, args: RemoveArgs) -> Result<()> {
    cache
        .remove(&args.name)
        .map_err(|e| suggestions::with_hints(e, &*cache))?;

    println!("🗑️  Removed {}", args.name);
    Ok(())
}
