//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_repository("wordlists", &[("a.txt", "a")]);
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

#![allow(dead_code)]

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::SourceRepo;
    pub use super::TestFixture;
}

/// A temporary directory holding a repository cache, plus room for source
/// repositories to clone from.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new().with_repository("exploits", &[("lib/x.rb", "")]);
///
/// fixture.command()
///     .arg("list")
///     .assert()
///     .success()
///     .stdout(predicate::str::contains("exploits"));
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a plain directory to the cache, as if it had been installed.
    pub fn with_repository(self, name: &str, files: &[(&str, &str)]) -> Self {
        let repository = self.temp_dir.child("cache").child(name);
        repository
            .create_dir_all()
            .expect("Failed to create repository directory");
        for (path, content) in files {
            repository
                .child(path)
                .write_str(content)
                .expect("Failed to write file");
        }
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the cache root.
    pub fn cache_root(&self) -> PathBuf {
        self.temp_dir.path().join("cache")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command for the plugin-repos binary using this fixture's
    /// cache root.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("plugin-repos");
        cmd.current_dir(self.path())
            .env_remove("PLUGIN_REPOS_GIT")
            .env_remove("RUST_LOG")
            .arg("--cache-root")
            .arg(self.cache_root());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A local git repository to clone from, with one commit on `main`, a `dev`
/// branch with a second commit, and a `v1.0.0` tag on the first commit.
#[allow(dead_code)]
pub struct SourceRepo {
    path: PathBuf,
}

#[allow(dead_code)]
impl SourceRepo {
    /// Create the source repository at `path`.
    pub fn create(path: &Path) -> Self {
        std::fs::create_dir_all(path).expect("Failed to create source directory");
        let source = Self {
            path: path.to_path_buf(),
        };

        source.git(&["init", "--quiet", "--initial-branch=main"]);
        source.git(&["config", "user.email", "tests@example.com"]);
        source.git(&["config", "user.name", "Tests"]);
        source.git(&["config", "commit.gpgsign", "false"]);

        source.commit("wordlists/common.txt", "admin\nroot\n", "Add common wordlist");
        source.git(&["tag", "v1.0.0"]);

        source.git(&["checkout", "--quiet", "-b", "dev"]);
        source.commit("wordlists/dev.txt", "dev\n", "Add dev wordlist");
        source.git(&["checkout", "--quiet", "main"]);

        source
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The URI to pass to `git clone`.
    pub fn uri(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Write a file and commit it on the current branch.
    pub fn commit(&self, file: &str, content: &str, message: &str) {
        let target = self.path.join(file);
        std::fs::create_dir_all(target.parent().unwrap()).expect("Failed to create parent");
        std::fs::write(&target, content).expect("Failed to write file");
        self.git(&["add", file]);
        self.git(&["commit", "--quiet", "-m", message]);
    }

    /// Run git inside the source repository and require success.
    pub fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_repository() {
        let fixture = TestFixture::new().with_repository("wordlists", &[("a/b.txt", "hello")]);
        assert!(fixture.cache_root().join("wordlists/a/b.txt").exists());
    }
}
