//! # Error Handling
//!
//! This module defines the centralized error type for `plugin-repos`. It uses
//! the `thiserror` library to build an `Error` enum covering every failure
//! the repository core and the cache manager can report.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant carries enough context (a path,
//!   a repository name, the full git command line) to diagnose the failure
//!   without re-running anything.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants fall into three groups:
//!
//! - Construction failures (`RepositoryNotFound`).
//! - External process failures (`CommandNotInstalled`, `CommandFailed`,
//!   `InvalidTimestamp`, `InvalidArgument`).
//! - Cache manager failures (`RepositoryNotInstalled`,
//!   `RepositoryAlreadyInstalled`, `InvalidName`, `InvalidSource`).
//!
//! Nothing in the library retries or suppresses these errors. They propagate
//! to the immediate caller, which decides what to do with partial state.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for plugin-repos operations
#[derive(Error, Debug)]
pub enum Error {
    /// The path given to open a repository does not exist or is not a
    /// directory.
    #[error("Repository not found: {}", path.display())]
    RepositoryNotFound { path: PathBuf },

    /// The external version-control executable could not be started.
    #[error("Command not installed: {command}")]
    CommandNotInstalled { command: String },

    /// The external version-control executable ran and reported failure.
    ///
    /// `command` is the complete invoked command line, including every
    /// argument.
    #[error("Command failed: {command} ({status}){}", if stderr.is_empty() { String::new() } else { format!("\n{}", stderr.trim_end()) })]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// `git log` produced output that is not an ISO-8601 timestamp.
    #[error("Could not parse commit timestamp {output:?}: {source}")]
    InvalidTimestamp {
        output: String,
        #[source]
        source: chrono::ParseError,
    },

    /// No repository with this name exists in the cache.
    #[error("Repository not installed: {name}")]
    RepositoryNotInstalled { name: String },

    /// A repository with this name already exists in the cache.
    #[error("Repository already installed: {name} ({})", path.display())]
    RepositoryAlreadyInstalled { name: String, path: PathBuf },

    /// The requested repository name cannot be used as a cache directory.
    #[error("Invalid repository name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// A remote, branch or tag that git would parse as an option.
    #[error("Invalid {kind} {value:?}: must not start with '-'")]
    InvalidArgument { kind: &'static str, value: String },

    /// No repository name could be derived from the source URI.
    #[error("Cannot derive a repository name from {uri:?}")]
    InvalidSource { uri: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
