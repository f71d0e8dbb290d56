//! # Installed Repositories
//!
//! A [`Repository`] is one on-disk checkout rooted at a directory. It is the
//! only stateful entity in the core, and the only state it keeps is its
//! canonical path (and the name derived from it). Everything git knows about
//! the checkout (remote URL, last commit time) is asked of git on demand, so
//! a `Repository` never holds stale version-control state.
//!
//! ## Lifecycle
//!
//! - [`Repository::open`] wraps an existing directory.
//! - [`Repository::clone_remote`] and [`Repository::install`] create one by
//!   cloning, then open it.
//! - [`Repository::pull`], [`Repository::checkout`] and [`Repository::update`]
//!   change what is on disk but never the path or name.
//! - [`Repository::delete`] removes the directory and consumes the handle.
//!
//! A failed clone or checkout leaves whatever git produced on disk. Cleaning
//! that up is the caller's decision.
//!
//! ## Content Lookup
//!
//! The path helpers (`join`, `has_file`, `find_file`, `glob`, `list_files`,
//! ...) never run a process. Plugin loaders use them to locate code, data
//! files and wordlists inside a repository.

use std::fmt;
use std::fs;
use std::io;
use std::num::NonZeroU32;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};
use crate::git::{Git, DEFAULT_REMOTE};

/// Pattern used by [`Repository::list_files`] when none is given.
pub const ALL_FILES: &str = "**/*";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Options for [`Repository::clone_remote`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneOptions {
    /// Shallow clone depth: only the most recent `depth` commits are fetched.
    pub depth: Option<NonZeroU32>,
}

/// Options for [`Repository::install`].
///
/// When both `branch` and `tag` are set, `branch` is checked out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOptions {
    pub branch: Option<String>,
    pub tag: Option<String>,
    pub clone: CloneOptions,
}

/// Options for [`Repository::pull`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullOptions {
    pub remote: String,
    pub branch: Option<String>,
    /// Also fetch tags (`--tags`).
    pub tags: bool,
}

impl Default for PullOptions {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            branch: None,
            tags: false,
        }
    }
}

/// Options for [`Repository::update`].
///
/// When both `branch` and `tag` are set, `branch` is checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOptions {
    pub branch: Option<String>,
    pub tag: Option<String>,
    pub remote: String,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            branch: None,
            tag: None,
            remote: DEFAULT_REMOTE.to_string(),
        }
    }
}

/// An installed repository.
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    name: String,
    git: Git,
}

impl Repository {
    /// Open an existing repository directory with the system git.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, Git::default())
    }

    /// Open an existing repository directory.
    ///
    /// The path is canonicalized once. Fails with `RepositoryNotFound` when
    /// it does not exist or is not a directory.
    pub fn open_with(path: impl AsRef<Path>, git: Git) -> Result<Self> {
        let path = path.as_ref();
        let not_found = || Error::RepositoryNotFound {
            path: path.to_path_buf(),
        };

        let path = fs::canonicalize(path).map_err(|_| not_found())?;
        if !path.is_dir() {
            return Err(not_found());
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self { path, name, git })
    }

    /// Clone `uri` into `dest` with the system git and open the result.
    pub fn clone_remote(
        uri: &str,
        dest: impl AsRef<Path>,
        options: &CloneOptions,
    ) -> Result<Self> {
        Self::clone_remote_with(Git::default(), uri, dest, options)
    }

    /// Clone `uri` into `dest` and open the result.
    ///
    /// Nothing is removed if the clone fails.
    pub fn clone_remote_with(
        git: Git,
        uri: &str,
        dest: impl AsRef<Path>,
        options: &CloneOptions,
    ) -> Result<Self> {
        let dest = dest.as_ref();
        git.clone_repository(uri, dest, options.depth)?;
        Self::open_with(dest, git)
    }

    /// Clone `uri` into `dest` with the system git, then check out the
    /// requested branch or tag.
    pub fn install(uri: &str, dest: impl AsRef<Path>, options: &InstallOptions) -> Result<Self> {
        Self::install_with(Git::default(), uri, dest, options)
    }

    /// Clone `uri` into `dest`, then check out the requested branch or tag.
    ///
    /// If the checkout fails the cloned directory stays on disk.
    pub fn install_with(
        git: Git,
        uri: &str,
        dest: impl AsRef<Path>,
        options: &InstallOptions,
    ) -> Result<Self> {
        let repository = Self::clone_remote_with(git, uri, dest, &options.clone)?;

        if let Some(reference) =
            checkout_target(non_empty(&options.branch), non_empty(&options.tag))
        {
            repository.checkout(reference)?;
        }

        Ok(repository)
    }

    /// Canonical path of the repository root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the repository directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL of the `origin` remote.
    pub fn url(&self) -> Result<String> {
        self.git.remote_url(&self.path, DEFAULT_REMOTE)
    }

    /// Committer date of the most recent commit.
    ///
    /// Returns `None` for a repository without any commits.
    pub fn last_updated_at(&self) -> Result<Option<DateTime<FixedOffset>>> {
        if !self.git.has_commits(&self.path)? {
            return Ok(None);
        }

        let output = self.git.last_commit_date(&self.path)?;
        if output.is_empty() {
            return Ok(None);
        }

        DateTime::parse_from_rfc3339(&output)
            .map(Some)
            .map_err(|source| Error::InvalidTimestamp { output, source })
    }

    /// `git pull` from a remote.
    pub fn pull(&self, options: &PullOptions) -> Result<()> {
        self.git.pull(
            &self.path,
            &options.remote,
            non_empty(&options.branch),
            options.tags,
        )
    }

    /// `git checkout` a branch or tag.
    pub fn checkout(&self, reference: &str) -> Result<()> {
        self.git.checkout(&self.path, reference)
    }

    /// Pull, then check out the requested branch or tag.
    ///
    /// Tags are fetched only when no branch is requested, so that a following
    /// tag checkout can find the tag.
    pub fn update(&self, options: &UpdateOptions) -> Result<()> {
        let branch = non_empty(&options.branch);
        self.git
            .pull(&self.path, &options.remote, branch, branch.is_none())?;

        if let Some(reference) = checkout_target(branch, non_empty(&options.tag)) {
            self.checkout(reference)?;
        }

        Ok(())
    }

    /// Recursively remove the repository directory.
    ///
    /// Removing a directory that is already gone is not an error.
    pub fn delete(self) -> Result<()> {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Absolute path of `relative` inside the repository. Existence is not
    /// checked.
    ///
    /// The result never leaves the repository root: a leading `/` (or drive
    /// prefix) is dropped and `..` cannot climb above the root, so
    /// `join("/etc/passwd")` and `join("../etc/passwd")` both name
    /// `<root>/etc/passwd`.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        let mut inside = PathBuf::new();
        for component in relative.as_ref().components() {
            match component {
                Component::Normal(part) => inside.push(part),
                Component::ParentDir => {
                    inside.pop();
                }
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        self.path.join(inside)
    }

    pub fn has_file(&self, relative: impl AsRef<Path>) -> bool {
        self.join(relative).is_file()
    }

    pub fn has_directory(&self, relative: impl AsRef<Path>) -> bool {
        self.join(relative).is_dir()
    }

    /// Absolute path of `relative` if it is an existing regular file.
    pub fn find_file(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        let path = self.join(relative);
        path.is_file().then_some(path)
    }

    /// Absolute paths matching `pattern`, relative to the repository root.
    ///
    /// Hidden entries (including `.git`) only match when the pattern names
    /// them with a literal leading dot.
    pub fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let mut matches = Vec::new();
        self.glob_each(pattern, |path| matches.push(path))?;
        matches.sort();
        Ok(matches)
    }

    /// Streaming form of [`Repository::glob`]: each match is handed to
    /// `consumer` as it is found.
    pub fn glob_each<F>(&self, pattern: &str, mut consumer: F) -> Result<()>
    where
        F: FnMut(PathBuf),
    {
        let root = Pattern::escape(&self.path.to_string_lossy());
        let full_pattern = format!("{}/{}", root, pattern.trim_start_matches('/'));
        let include_hidden = names_hidden(pattern);

        for entry in glob::glob_with(&full_pattern, MATCH_OPTIONS)? {
            let path = entry.map_err(|e| Error::Io(e.into()))?;
            if !self.contains(&path) || (!include_hidden && self.is_hidden(&path)) {
                continue;
            }
            consumer(path);
        }

        Ok(())
    }

    /// Paths matching `pattern`, relative to the repository root.
    ///
    /// Without a pattern every regular file in the repository is listed.
    pub fn list_files(&self, pattern: Option<&str>) -> Result<Vec<PathBuf>> {
        let files_only = pattern.is_none();
        let mut files = Vec::new();

        self.glob_each(pattern.unwrap_or(ALL_FILES), |path| {
            if files_only && !path.is_file() {
                return;
            }
            if let Ok(relative) = path.strip_prefix(&self.path) {
                files.push(relative.to_path_buf());
            }
        })?;

        files.sort();
        Ok(files)
    }

    /// Whether a glob match lies under the root without going through `..`.
    fn contains(&self, path: &Path) -> bool {
        path.strip_prefix(&self.path)
            .map(|relative| {
                !relative
                    .components()
                    .any(|component| matches!(component, Component::ParentDir))
            })
            .unwrap_or(false)
    }

    fn is_hidden(&self, path: &Path) -> bool {
        path.strip_prefix(&self.path)
            .map(|relative| {
                relative.components().any(|component| {
                    matches!(component, Component::Normal(name) if name.to_string_lossy().starts_with('.'))
                })
            })
            .unwrap_or(false)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Whether a glob pattern explicitly spells out a hidden path component.
fn names_hidden(pattern: &str) -> bool {
    pattern
        .split('/')
        .any(|part| part.starts_with('.') && part != "." && part != "..")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// The reference to check out after a clone or pull; a branch wins over a tag.
fn checkout_target<'a>(branch: Option<&'a str>, tag: Option<&'a str>) -> Option<&'a str> {
    branch.or(tag)
}
