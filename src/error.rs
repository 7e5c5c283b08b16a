use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for git-flow-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Command `{command}` failed with {}", describe_status(.status))]
    Command {
        command: String,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid repository path '{}': {source}", .path.display())]
    RepositoryPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Release aborted: {0}")]
    Aborted(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-flow-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create an abort error with the reason the run stopped
    pub fn aborted(msg: impl Into<String>) -> Self {
        ReleaseError::Aborted(msg.into())
    }

    /// Whether this error is an operator-initiated abort rather than a failure
    pub fn is_abort(&self) -> bool {
        matches!(self, ReleaseError::Aborted(_))
    }
}
