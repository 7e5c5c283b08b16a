use crate::error::{ReleaseError, Result};
use crate::git::{CommandOutput, CommandRunner, GitCommand};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs commands through the installed `git` executable
pub struct SystemRunner {
    program: String,
}

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner {
            program: "git".to_string(),
        }
    }

    /// Use a different executable instead of `git` found on `PATH`
    pub fn with_program(program: impl Into<String>) -> Self {
        SystemRunner {
            program: program.into(),
        }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &GitCommand, cwd: &Path) -> Result<CommandOutput> {
        debug!("Running `{}` in {}", command, cwd.display());

        let output = Command::new(&self.program)
            .args(command.args())
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ReleaseError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        debug!("`{}` exited with {:?}", command, result.status);

        Ok(result)
    }
}
