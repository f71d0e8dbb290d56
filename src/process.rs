//! # External Process Invocation
//!
//! Every version-control operation goes through the [`ProcessRunner`] trait:
//! an argument vector and an optional working directory go in, and one of
//! two outcomes comes back. Either the executable could not be found, or it
//! ran and exited with some status. Interpreting that status is left to the
//! caller (see `git`).
//!
//! The working directory is handed to the child process. The host process's
//! own current directory is never touched, so concurrent calls against
//! different repositories do not interfere with each other.
//!
//! `SystemRunner` is the real implementation. Tests substitute a recording
//! fake.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// Captured result of a process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// A successful run with the given standard output.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and standard error.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human readable exit status, used in error messages.
    pub fn status(&self) -> String {
        match self.code {
            Some(code) => format!("exit status: {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// The observable outcomes of invoking an external executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The executable could not be located.
    NotFound,
    /// The executable ran; inspect the output for its exit status.
    Exited(ProcessOutput),
}

/// Runs external programs.
///
/// Implementations must not go through a shell: `args` are passed to the
/// program verbatim.
///
/// A `working_dir` that does not exist is reported as an `Io` error of kind
/// `NotFound`, never as `ProcessOutcome::NotFound`.
pub trait ProcessRunner: Send + Sync {
    fn run(
        &self,
        program: &OsStr,
        args: &[OsString],
        working_dir: Option<&Path>,
    ) -> Result<ProcessOutcome>;
}

/// Runs programs as child processes with `std::process::Command`, blocking
/// until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(
        &self,
        program: &OsStr,
        args: &[OsString],
        working_dir: Option<&Path>,
    ) -> Result<ProcessOutcome> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = working_dir {
            // A missing working directory surfaces from spawn() as NotFound,
            // which would be indistinguishable from a missing executable.
            if !dir.is_dir() {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("working directory does not exist: {}", dir.display()),
                )));
            }
            command.current_dir(dir);
        }

        debug!(
            "running {} (in {})",
            command_line(program, args),
            working_dir
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| ".".to_string())
        );

        match command.output() {
            Ok(output) => Ok(ProcessOutcome::Exited(ProcessOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ProcessOutcome::NotFound),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

/// Render a program and its arguments as a single line for diagnostics.
pub fn command_line(program: &OsStr, args: &[OsString]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(OsString::as_os_str))
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
