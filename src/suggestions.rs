//! # Error Suggestions
//!
//! This module turns library errors into CLI errors that say what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use plugin_repos::suggestions;
//!
//! let repository = cache
//!     .get(name)
//!     .map_err(|e| suggestions::with_hints(e, &cache))?;
//! ```

use crate::cache::Registry;
use crate::error::Error;

/// Wrap a library error with hints for the user.
///
/// The registry is consulted to suggest installed names for typos.
pub fn with_hints(error: Error, registry: &dyn Registry) -> anyhow::Error {
    match error {
        Error::RepositoryNotInstalled { name } => {
            let installed = registry.names().unwrap_or_default();
            repository_not_installed(&name, &installed)
        }
        Error::RepositoryAlreadyInstalled { name, path } => anyhow::anyhow!(
            "Repository already installed: {name} ({path})\n\n\
             hint: Run 'plugin-repos update {name}' to fetch new commits\n\
             hint: Use --name to install it under a different name",
            path = path.display()
        ),
        Error::CommandNotInstalled { command } => command_not_installed(&command),
        Error::InvalidSource { uri } => anyhow::anyhow!(
            "Cannot derive a repository name from {uri:?}\n\n\
             hint: Use --name to choose the name explicitly"
        ),
        other => anyhow::Error::new(other),
    }
}

/// Generate an error for a repository name that is not in the cache.
///
/// Suggests the closest installed name when there is one.
pub fn repository_not_installed(name: &str, installed: &[String]) -> anyhow::Error {
    let candidates: Vec<&str> = installed.iter().map(String::as_str).collect();
    let did_you_mean = find_similar(name, &candidates)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Repository not installed: {name}{did_you_mean}\n\n\
         hint: Run 'plugin-repos list' to see installed repositories\n\
         hint: Run 'plugin-repos install <URI>' to install it"
    )
}

/// Generate an error for when the git executable cannot be started.
pub fn command_not_installed(command: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Command not installed: {command}\n\n\
         hint: Install git and make sure it is on your PATH\n\
         hint: Use --git or PLUGIN_REPOS_GIT to point at a git executable"
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut previous: Vec<usize> = (0..=b_len).collect();
    let mut current = vec![0usize; b_len + 1];

    for i in 1..=a_len {
        current[0] = i;
        for j in 1..=b_len {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            current[j] = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RepositoryCache;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_repository_not_installed_suggests_similar() {
        let installed = vec!["wordlists".to_string(), "exploits".to_string()];
        let message = repository_not_installed("wordlist", &installed).to_string();

        assert!(message.contains("Repository not installed: wordlist"));
        assert!(message.contains("Did you mean 'wordlists'?"));
        assert!(message.contains("plugin-repos list"));
    }

    #[test]
    fn test_repository_not_installed_no_suggestion_for_very_different() {
        let installed = vec!["wordlists".to_string()];
        let message = repository_not_installed("payloads", &installed).to_string();

        assert!(!message.contains("Did you mean"));
        assert!(message.contains("hint:"));
    }

    #[test]
    fn test_command_not_installed_includes_hints() {
        let message = command_not_installed("git").to_string();

        assert!(message.contains("Command not installed: git"));
        assert!(message.contains("PLUGIN_REPOS_GIT"));
    }

    #[test]
    fn test_with_hints_uses_registry_names() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("exploits")).unwrap();
        let cache = RepositoryCache::new(temp_dir.path());

        let error = Error::RepositoryNotInstalled {
            name: "exploit".to_string(),
        };
        let message = with_hints(error, &cache).to_string();

        assert!(message.contains("Did you mean 'exploits'?"));
    }

    #[test]
    fn test_with_hints_already_installed() {
        let temp_dir = TempDir::new().unwrap();
        let cache = RepositoryCache::new(temp_dir.path());

        let error = Error::RepositoryAlreadyInstalled {
            name: "exploits".to_string(),
            path: PathBuf::from("/cache/exploits"),
        };
        let message = with_hints(error, &cache).to_string();

        assert!(message.contains("plugin-repos update exploits"));
        assert!(message.contains("--name"));
    }

    #[test]
    fn test_with_hints_passes_other_errors_through() {
        let temp_dir = TempDir::new().unwrap();
        let cache = RepositoryCache::new(temp_dir.path());

        let error = Error::CommandFailed {
            command: "git pull --tags origin".to_string(),
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        };
        let message = with_hints(error, &cache).to_string();

        assert_eq!(message, "Command failed: git pull --tags origin (exit status: 1)");
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("exploits", "exploits"), 0);
        assert_eq!(edit_distance("exploit", "exploits"), 1);
        assert_eq!(edit_distance("expolits", "exploits"), 2);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_find_similar() {
        let candidates = ["wordlists", "exploits", "payloads"];

        assert_eq!(find_similar("wordlist", &candidates), Some("wordlists"));
        assert_eq!(find_similar("payload", &candidates), Some("payloads"));
        assert_eq!(find_similar("zzz", &candidates), None);
    }
}
