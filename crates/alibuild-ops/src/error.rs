use serde::Serialize;
use thiserror::Error;

/// Execution failure reported by a [`CommandRunner`](crate::CommandRunner).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ShellError {
    #[error("executable not found for command: {command}")]
    ExecutableNotFound { command: String },

    #[error("failed to spawn `{command}`: {message}")]
    SpawnFailed { command: String, message: String },

    #[error("`{command}` exited with status {exit_code}: {stderr}")]
    NonZeroExit {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("`{command}` was terminated by a signal")]
    Terminated { command: String },
}

impl ShellError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExecutableNotFound { .. } => "executable_not_found",
            Self::SpawnFailed { .. } => "spawn_failed",
            Self::NonZeroExit { .. } => "non_zero_exit",
            Self::Terminated { .. } => "terminated",
        }
    }

    /// The command line that failed.
    pub fn command(&self) -> &str {
        match self {
            Self::ExecutableNotFound { command }
            | Self::SpawnFailed { command, .. }
            | Self::NonZeroExit { command, .. }
            | Self::Terminated { command } => command,
        }
    }
}
