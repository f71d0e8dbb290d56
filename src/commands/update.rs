//! # Update Command Implementation
//!
//! This module implements the `update` subcommand, which pulls new commits
//! into installed repositories.
//!
//! ## Functionality
//!
//! - **Single repository**: `plugin-repos update NAME` pulls from `origin`.
//!   With `--branch`, only that branch is pulled and then checked out. With
//!   `--tag` (or no reference at all) tags are fetched too, and the tag is
//!   checked out.
//!
//! - **All repositories**: without a name every installed repository is
//!   pulled. A failure in one repository does not stop the others; the
//!   command reports each failure and exits non-zero at the end.

use anyhow::Result;
use clap::Args;

use plugin_repos::cache::RepositoryCache;
use plugin_repos::repository::UpdateOptions;
use plugin_repos::suggestions;

/// Update one or all installed repositories
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Name of the repository to update. Updates every repository if omitted.
    pub name: Option<String>,

    /// Pull and check out this branch
    #[arg(long, requires = "name", conflicts_with = "tag")]
    pub branch: Option<String>,

    /// Fetch tags and check out this tag
    #[arg(long, requires = "name")]
    pub tag: Option<String>,
}

/// Execute the `update` command.
pub fn execute(cache: &mut RepositoryCache, args: UpdateArgs) -> Result<()> {
    match args.name {
        Some(name) => {
            let options = UpdateOptions {
                branch: args.branch,
                tag: args.tag,
                ..Default::default()
            };
            cache
                .update(&name, &options)
                .map_err(|e| suggestions::with_hints(e, &*cache))?;
            println!("✅ Updated {}", name);
            Ok(())
        }
        None => update_all(cache),
    }
}

fn update_all(cache: &mut RepositoryCache) -> Result<()> {
    let results = cache.update_all()?;

    if results.is_empty() {
        println!("No repositories installed in: {}", cache.root().display());
        return Ok(());
    }

    let mut failed_count = 0;
    for (name, result) in &results {
        match result {
            Ok(()) => println!("  ✅ Updated: {}", name),
            Err(e) => {
                failed_count += 1;
                eprintln!("  ❌ Failed to update {}: {}", name, e);
            }
        }
    }

    if failed_count > 0 {
        anyhow::bail!(
            "{} of {} repositories failed to update",
            failed_count,
            results.len()
        );
    }

    println!("\n✅ Successfully updated {} repositories.", results.len());
    Ok(())
}
