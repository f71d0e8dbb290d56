//! Default values for plugin-repos configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Environment variable overriding the cache root.
pub const CACHE_ROOT_ENV: &str = "PLUGIN_REPOS_CACHE";

/// Environment variable overriding the git executable.
pub const GIT_ENV: &str = "PLUGIN_REPOS_GIT";

/// Returns the default cache root directory.
///
/// Uses the platform-appropriate cache directory:
/// - Linux: `~/.cache/plugin-repos` (XDG Base Directory)
/// - macOS: `~/Library/Caches/plugin-repos`
/// - Windows: `{FOLDERID_LocalAppData}\plugin-repos`
///
/// Falls back to `.plugin-repos-cache` in the current directory if the
/// platform cache directory cannot be determined.
///
/// This can be overridden by the `--cache-root` CLI flag or the
/// `PLUGIN_REPOS_CACHE` environment variable.
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("plugin-repos"))
        .unwrap_or_else(|| PathBuf::from(".plugin-repos-cache"))
}
