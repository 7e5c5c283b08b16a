//! Git command abstraction layer
//!
//! Every repository interaction goes through the external `git` executable.
//! The [CommandRunner] trait is the seam between the release workflow and the
//! process that actually runs:
//!
//! - [runner::SystemRunner]: spawns the real `git` binary
//! - [mock::MockRunner]: scripted outputs for testing, records every call
//!
//! A runner never treats a non-zero exit as an error by itself. It hands back
//! a [CommandOutput] and the caller decides whether the failure is fatal
//! ([CommandOutput::into_result]) or an expected absence (no tags yet, no
//! matching branch).
//!
//! ```rust
//! # use git_flow_release::git::{GitRepository, MockRunner};
//! let runner = MockRunner::new();
//! runner.fail("git describe --tags --abbrev=0", "fatal: No names found");
//! let repo = GitRepository::new("/tmp/repo", runner);
//! assert_eq!(repo.describe_latest_tag().unwrap(), None);
//! ```

pub mod mock;
pub mod repository;
pub mod runner;

pub use mock::MockRunner;
pub use repository::GitRepository;
pub use runner::SystemRunner;

use crate::error::{ReleaseError, Result};
use std::fmt;
use std::path::Path;

/// Argument list of a single `git` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    args: Vec<String>,
}

impl GitCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GitCommand {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for GitCommand {
    /// Renders the command the way an operator would type it
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("git")?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished git process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        CommandOutput {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            status: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Trimmed stdout on success, a `ReleaseError::Command` otherwise
    pub fn into_result(self, command: &GitCommand) -> Result<String> {
        if self.success() {
            Ok(self.stdout.trim().to_string())
        } else {
            Err(ReleaseError::Command {
                command: command.to_string(),
                status: self.status,
                stdout: self.stdout,
                stderr: self.stderr,
            })
        }
    }
}

/// Executes git commands in a working directory
///
/// Implementations return `Err` only when the process could not be run at
/// all; a non-zero exit is reported through [CommandOutput::status].
pub trait CommandRunner {
    fn run(&self, command: &GitCommand, cwd: &Path) -> Result<CommandOutput>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, command: &GitCommand, cwd: &Path) -> Result<CommandOutput> {
        (**self).run(command, cwd)
    }
}
