//! # Install Command Implementation
//!
//! This module implements the `install` subcommand, which clones a git
//! repository into the cache and optionally checks out a branch or tag.
//!
//! The repository's name defaults to the last segment of the URI without a
//! `.git` suffix. If the clone or the checkout fails, nothing is left behind
//! in the cache.

use anyhow::Result;
use clap::Args;
use std::num::NonZeroU32;

use plugin_repos::cache::RepositoryCache;
use plugin_repos::repository::{CloneOptions, InstallOptions};
use plugin_repos::suggestions;

/// Install a repository into the cache
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Git URI to clone (URL, scp-like address, or local path)
    pub uri: String,

    /// Install under this name instead of the one derived from the URI
    #[arg(long)]
    pub name: Option<String>,

    /// Branch to check out after cloning
    #[arg(long, conflicts_with = "tag")]
    pub branch: Option<String>,

    /// Tag to check out after cloning
    #[arg(long)]
    pub tag: Option<String>,

    /// Create a shallow clone with only the most recent N commits
    #[arg(long, value_name = "N")]
    pub depth: Option<NonZeroU32>,
}

/// Execute the `install` command.
pub fn execute(cache: &mut RepositoryCache, args: InstallArgs) -> Result<()> {
    let options = InstallOptions {
        branch: args.branch,
        tag: args.tag,
        clone: CloneOptions { depth: args.depth },
    };

    let repository = cache
        .install(&args.uri, args.name.as_deref(), &options)
        .map_err(|e| suggestions::with_hints(e, &*cache))?;

    println!(
        "✅ Installed {} into {}",
        repository,
        repository.path().display()
    );
    Ok(())
}
