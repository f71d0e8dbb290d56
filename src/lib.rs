//! # Plugin Repositories Library
//!
//! This library manages a local cache of third-party git repositories so
//! that a host application can discover and load plugin content (code, data
//! files, wordlists) from them by name. It is used by the `plugin-repos`
//! command-line tool but is meant to be embedded directly by plugin loaders.
//!
//! ## Quick Example
//!
//! ```
//! use plugin_repos::repository::Repository;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let root = dir.path().join("wordlists");
//! std::fs::create_dir_all(root.join("data")).unwrap();
//! std::fs::write(root.join("data/common.txt"), "admin\nroot\n").unwrap();
//!
//! let repository = Repository::open(&root).unwrap();
//! assert_eq!(repository.name(), "wordlists");
//! assert!(repository.has_file("data/common.txt"));
//! assert_eq!(repository.list_files(None).unwrap().len(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Repositories (`repository`)**: One installed checkout. Opening,
//!   cloning, installing, pulling, checking out, updating and deleting, plus
//!   file lookup inside the checkout.
//! - **Git (`git`, `process`)**: Every version-control operation is an
//!   argument vector handed to a `ProcessRunner`, with the target directory
//!   passed explicitly as the child's working directory. Tests swap the
//!   runner for a fake.
//! - **Cache (`cache`)**: The directory of installed repositories. Its
//!   subdirectories are the registry; there is no manifest file.
//! - **Errors (`error`, `suggestions`)**: A single `Error` enum for the
//!   library and hint-bearing wrappers for the CLI.

pub mod cache;
pub mod defaults;
pub mod error;
pub mod git;
pub mod process;
pub mod repository;
pub mod suggestions;

#[cfg(test)]
mod repository_proptest;
