//! # Purge Command Implementation
//!
//! This module implements the `purge` subcommand, which deletes the whole
//! cache directory and every repository in it. It asks for confirmation
//! unless `--yes` is given.

use anyhow::Result;
use clap::Args;
use dialoguer::Confirm;

use plugin_repos::cache::{Registry, RepositoryCache};

/// Remove every installed repository
#[derive(Args, Debug)]
pub struct PurgeArgs {
    /// Skip confirmation prompt and delete immediately
    #[arg(long)]
    pub yes: bool,
}

/// Execute the `purge` command.
pub fn execute(cache: &mut RepositoryCache, args: PurgeArgs) -> Result<()> {
    if !cache.root().exists() {
        println!("Cache directory does not exist: {}", cache.root().display());
        println!("Nothing to purge.");
        return Ok(());
    }

    if !args.yes {
        let count = cache.names()?.len();
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete {} and all {} repositories in it?",
                cache.root().display(),
                count
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Purge cancelled.");
            return Ok(());
        }
    }

    cache.purge()?;
    println!("🗑️  Purged {}", cache.root().display());
    Ok(())
}
