//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `plugin-repos` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the repository cache and the parsed
//!   `Args` and performs the command's logic by calling into the
//!   `plugin_repos` library.

pub mod install;
pub mod list;
pub mod purge;
pub mod remove;
pub mod show;
pub mod update;

use chrono::{DateTime, FixedOffset};

/// Render a commit timestamp for display; `never` for repositories without
/// commits.
pub(crate) fn format_timestamp(timestamp: Option<DateTime<FixedOffset>>) -> String {
    timestamp
        .map(|timestamp| timestamp.format("%Y-%m-%d %H:%M:%S %z").to_string())
        .unwrap_or_else(|| "never".to_string())
}
