//! # Repository Cache
//!
//! The cache root holds one subdirectory per installed repository, and those
//! subdirectories are the registry: there is no manifest file. A
//! repository's name is its directory's base name.
//!
//! [`Registry`] is the read side that plugin loaders depend on (list the
//! installed names, resolve a name to a [`Repository`], search across all of
//! them). [`RepositoryCache`] implements it over a directory and adds the
//! install/update/remove/purge orchestration.
//!
//! Mutating methods take `&mut self`. Holding one `RepositoryCache` per cache
//! root therefore keeps at most one mutation in flight per repository, which
//! git's own lock files require.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::git::Git;
use crate::repository::{InstallOptions, Repository, UpdateOptions};

/// Read access to a set of installed repositories, keyed by name.
pub trait Registry {
    /// Installed repository names, sorted.
    fn names(&self) -> Result<Vec<String>>;

    /// Resolve a name to its repository.
    fn get(&self, name: &str) -> Result<Repository>;

    /// Every installed repository, in name order.
    fn repositories(&self) -> Result<Vec<Repository>> {
        self.names()?.iter().map(|name| self.get(name)).collect()
    }

    /// The first repository (in name order) containing `relative` as a
    /// regular file.
    fn find_file(&self, relative: &Path) -> Result<Option<PathBuf>> {
        for repository in self.repositories()? {
            if let Some(path) = repository.find_file(relative) {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    /// Absolute paths matching `pattern` in every repository.
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let mut matches = Vec::new();
        for repository in self.repositories()? {
            matches.extend(repository.glob(pattern)?);
        }
        Ok(matches)
    }

    /// Relative paths matching `pattern` (all regular files by default),
    /// grouped by repository name. Repositories without matches are omitted.
    fn list_files(&self, pattern: Option<&str>) -> Result<BTreeMap<String, Vec<PathBuf>>> {
        let mut files = BTreeMap::new();
        for repository in self.repositories()? {
            let matches = repository.list_files(pattern)?;
            if !matches.is_empty() {
                files.insert(repository.name().to_string(), matches);
            }
        }
        Ok(files)
    }
}

/// Installed repositories stored under a cache root directory.
#[derive(Debug, Clone)]
pub struct RepositoryCache {
    root: PathBuf,
    git: Git,
}

impl RepositoryCache {
    /// A cache at `root` using the system git. The directory is created on
    /// the first install.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_git(root, Git::default())
    }

    /// A cache at `root` using the given git handle.
    pub fn with_git(root: impl Into<PathBuf>, git: Git) -> Self {
        Self {
            root: root.into(),
            git,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a repository called `name` lives in, whether or not it is
    /// installed.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }

    pub fn has(&self, name: &str) -> bool {
        self.path_for(name).map(|path| path.is_dir()).unwrap_or(false)
    }

    /// Clone `uri` into the cache and check out the requested reference.
    ///
    /// `name` defaults to the one derived from `uri`. If any step fails, the
    /// partially created directory is removed so that it does not show up
    /// as an installed repository.
    pub fn install(
        &mut self,
        uri: &str,
        name: Option<&str>,
        options: &InstallOptions,
    ) -> Result<Repository> {
        let name = match name {
            Some(name) => name.to_string(),
            None => repository_name(uri)?,
        };
        let dest = self.path_for(&name)?;
        if dest.exists() {
            return Err(Error::RepositoryAlreadyInstalled { name, path: dest });
        }

        fs::create_dir_all(&self.root)?;
        info!("installing {} from {}", name, uri);

        match Repository::install_with(self.git.clone(), uri, &dest, options) {
            Ok(repository) => Ok(repository),
            Err(e) => {
                if let Err(cleanup) = remove_dir_if_exists(&dest) {
                    warn!(
                        "could not remove partial install {}: {}",
                        dest.display(),
                        cleanup
                    );
                }
                Err(e)
            }
        }
    }

    /// Pull and check out the requested reference in one repository.
    pub fn update(&mut self, name: &str, options: &UpdateOptions) -> Result<()> {
        let repository = self.get(name)?;
        info!("updating {}", repository);
        repository.update(options)
    }

    /// Update every installed repository, continuing past failures.
    ///
    /// Returns one result per repository, in name order.
    pub fn update_all(&mut self) -> Result<Vec<(String, Result<()>)>> {
        let mut results = Vec::new();

        for name in self.names()? {
            let result = self.update(&name, &UpdateOptions::default());
            if let Err(e) = &result {
                warn!("failed to update {}: {}", name, e);
            }
            results.push((name, result));
        }

        Ok(results)
    }

    /// Delete an installed repository.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let repository = self.get(name)?;
        info!("removing {}", repository);
        repository.delete()
    }

    /// Delete the whole cache root. Purging a missing cache is not an error.
    pub fn purge(&mut self) -> Result<()> {
        info!("purging {}", self.root.display());
        remove_dir_if_exists(&self.root)
    }
}

impl Registry for RepositoryCache {
    fn names(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || !entry.path().is_dir() {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    fn get(&self, name: &str) -> Result<Repository> {
        let path = self.path_for(name)?;
        if !path.is_dir() {
            return Err(Error::RepositoryNotInstalled {
                name: name.to_string(),
            });
        }
        Repository::open_with(path, self.git.clone())
    }
}

/// Derive a repository name from a clone URI.
///
/// Handles URLs (`https://host/org/plugins.git`), scp-like addresses
/// (`git@host:org/plugins.git`) and local paths. A trailing `/` and `.git`
/// suffix are dropped.
pub fn repository_name(uri: &str) -> Result<String> {
    let invalid = || Error::InvalidSource {
        uri: uri.to_string(),
    };

    let path = match Url::parse(uri) {
        // Single-letter schemes are Windows drive letters, not URLs.
        Ok(url) if url.scheme().len() > 1 => url.path().to_string(),
        _ => uri.to_string(),
    };

    let last = path
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\', ':'])
        .next()
        .unwrap_or_default();
    let name = last.strip_suffix(".git").unwrap_or(last);

    validate_name(name).map_err(|_| invalid())?;
    Ok(name.to_string())
}

/// Check that `name` can be used as a single cache directory.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name == "." || name == ".." {
        Some("must not be a relative path component")
    } else if name.starts_with('.') {
        Some("must not start with '.'")
    } else if name.contains(['/', '\\', '\0']) {
        Some("must be a single path segment")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
