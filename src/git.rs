//! Argument vectors for the git subcommands the repository core uses.
//!
//! Each operation builds `[subcommand, ...flags, ...positionals]` and hands
//! it to a [`ProcessRunner`]. The runner's outcome is mapped onto the error
//! taxonomy: a missing executable is `CommandNotInstalled`, a non-zero exit
//! is `CommandFailed` carrying the full command line, anything else is
//! success.
//!
//! User-supplied values never reach git as options: `clone` takes them after
//! `--`, and `pull` and `checkout` refuse remotes and references that begin
//! with `-` (for `checkout`, `--` would start pathspecs).
//!
//! This uses the system git command, so SSH keys, credential helpers and
//! anything else configured in `~/.gitconfig` apply as usual.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::process::{command_line, ProcessOutcome, ProcessOutput, ProcessRunner, SystemRunner};

/// Default name of the git executable.
pub const DEFAULT_PROGRAM: &str = "git";

/// The remote used when none is given.
pub const DEFAULT_REMOTE: &str = "origin";

/// Handle to the git executable.
///
/// Cheap to clone; all clones share the same runner.
#[derive(Clone)]
pub struct Git {
    program: OsString,
    runner: Arc<dyn ProcessRunner>,
}

impl Default for Git {
    fn default() -> Self {
        Self::new(Arc::new(SystemRunner))
    }
}

impl fmt::Debug for Git {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Git")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

impl Git {
    /// Run `git` through the given runner.
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            program: OsString::from(DEFAULT_PROGRAM),
            runner,
        }
    }

    /// Use a different executable, e.g. an absolute path to git.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// `git clone [--depth N] -- <uri> <dest>`
    pub fn clone_repository(
        &self,
        uri: &str,
        dest: &Path,
        depth: Option<NonZeroU32>,
    ) -> Result<()> {
        let mut args = vec![OsString::from("clone")];
        if let Some(depth) = depth {
            args.push("--depth".into());
            args.push(depth.to_string().into());
        }
        args.push("--".into());
        args.push(uri.into());
        args.push(dest.into());

        self.run(&args, None).map(drop)
    }

    /// `git pull [--tags] <remote> [<branch>]`, run inside `dir`.
    pub fn pull(&self, dir: &Path, remote: &str, branch: Option<&str>, tags: bool) -> Result<()> {
        let mut args = vec![OsString::from("pull")];
        if tags {
            args.push("--tags".into());
        }
        args.push(positional("remote", remote)?.into());
        if let Some(branch) = branch {
            args.push(positional("branch", branch)?.into());
        }

        self.run(&args, Some(dir)).map(drop)
    }

    /// `git checkout <reference>`, run inside `dir`.
    pub fn checkout(&self, dir: &Path, reference: &str) -> Result<()> {
        let reference = positional("reference", reference)?;
        self.run(&["checkout".into(), reference.into()], Some(dir))
            .map(drop)
    }

    /// `git remote get-url <remote>`, trimmed.
    pub fn remote_url(&self, dir: &Path, remote: &str) -> Result<String> {
        let output = self.run(
            &["remote".into(), "get-url".into(), remote.into()],
            Some(dir),
        )?;
        Ok(output.stdout.trim().to_string())
    }

    /// Whether `HEAD` resolves to a commit.
    ///
    /// `git rev-parse --verify --quiet` exits with 1 and prints nothing when
    /// the ref does not exist, as in a freshly initialized repository.
    pub fn has_commits(&self, dir: &Path) -> Result<bool> {
        let args: [OsString; 4] = [
            "rev-parse".into(),
            "--verify".into(),
            "--quiet".into(),
            "HEAD".into(),
        ];
        let output = self.spawn(&args, Some(dir))?;
        match output.code {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(self.failed(&args, &output)),
        }
    }

    /// Committer date of the most recent commit in strict ISO-8601 form,
    /// trimmed. Empty when there are no commits.
    pub fn last_commit_date(&self, dir: &Path) -> Result<String> {
        let output = self.run(
            &["log".into(), "-1".into(), "--format=%cI".into()],
            Some(dir),
        )?;
        Ok(output.stdout.trim().to_string())
    }

    /// Run a subcommand and require a zero exit status.
    pub fn run(&self, args: &[OsString], dir: Option<&Path>) -> Result<ProcessOutput> {
        let output = self.spawn(args, dir)?;
        if output.is_success() {
            Ok(output)
        } else {
            Err(self.failed(args, &output))
        }
    }

    /// Run a subcommand, mapping only a missing executable to an error.
    fn spawn(&self, args: &[OsString], dir: Option<&Path>) -> Result<ProcessOutput> {
        match self.runner.run(&self.program, args, dir)? {
            ProcessOutcome::NotFound => Err(Error::CommandNotInstalled {
                command: self.program.to_string_lossy().into_owned(),
            }),
            ProcessOutcome::Exited(output) => Ok(output),
        }
    }

    fn failed(&self, args: &[OsString], output: &ProcessOutput) -> Error {
        Error::CommandFailed {
            command: command_line(&self.program, args),
            status: output.status(),
            stderr: output.stderr.clone(),
        }
    }
}

/// Reject a value that git would read as an option.
fn positional<'a>(kind: &'static str, value: &'a str) -> Result<&'a str> {
    if value.starts_with('-') {
        return Err(Error::InvalidArgument {
            kind,
            value: value.to_string(),
        });
    }
    Ok(value)
}
