use crate::ShellError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Per-invocation option understood by a [`CommandRunner`](crate::CommandRunner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOption {
    /// Ordered `KEY=VALUE` assignments layered over the inherited environment.
    Env(Vec<String>),
    /// Directory the command runs in.
    WorkingDir(PathBuf),
}

impl ShellOption {
    pub fn env<I, S>(vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Env(vars.into_iter().map(Into::into).collect())
    }

    pub fn working_dir(dir: impl Into<PathBuf>) -> Self {
        Self::WorkingDir(dir.into())
    }
}

/// Collapse every `Env` option into one ordered list of assignments.
///
/// The first assignment of a key wins, so options placed earlier in the list
/// shadow later ones. Entries without `=` are dropped.
pub(crate) fn resolve_env(options: &[ShellOption]) -> Vec<(String, String)> {
    let mut resolved: Vec<(String, String)> = Vec::new();

    for vars in options.iter().filter_map(|opt| match opt {
        ShellOption::Env(vars) => Some(vars),
        ShellOption::WorkingDir(_) => None,
    }) {
        for entry in vars {
            let Some((key, value)) = entry.split_once('=') else {
                tracing::debug!(entry = %entry, "ignoring environment entry without '='");
                continue;
            };
            if key.is_empty() {
                tracing::debug!(entry = %entry, "ignoring environment entry with empty key");
                continue;
            }
            if resolved.iter().any(|(k, _)| k == key) {
                continue;
            }
            resolved.push((key.to_string(), value.to_string()));
        }
    }

    resolved
}

pub(crate) fn resolve_working_dir(options: &[ShellOption]) -> Option<&Path> {
    options.iter().rev().find_map(|opt| match opt {
        ShellOption::WorkingDir(dir) => Some(dir.as_path()),
        ShellOption::Env(_) => None,
    })
}

/// Captured text of one output stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Output {
    raw: String,
}

impl Output {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Either the first line (without terminator) or the full captured text.
    pub fn text(&self, first_line_only: bool) -> &str {
        if first_line_only {
            self.raw.lines().next().unwrap_or("")
        } else {
            &self.raw
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl From<&str> for Output {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Output {
    fn from(raw: String) -> Self {
        Self { raw }
    }
}

/// Outcome of one command execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellResult {
    pub command: String,
    pub stdout: Output,
    pub stderr: Output,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ShellError>,
}

impl ShellResult {
    /// A zero-exit result carrying `stdout`.
    pub fn success(command: impl Into<String>, stdout: impl Into<Output>) -> Self {
        Self {
            command: command.into(),
            stdout: stdout.into(),
            stderr: Output::default(),
            exit_code: Some(0),
            error: None,
        }
    }

    /// A failed result. The exit code is taken from the error when it has one.
    pub fn failure(command: impl Into<String>, error: ShellError) -> Self {
        let exit_code = match &error {
            ShellError::NonZeroExit { exit_code, .. } => Some(*exit_code),
            _ => None,
        };
        let stderr = match &error {
            ShellError::NonZeroExit { stderr, .. } => Output::new(stderr.clone()),
            _ => Output::default(),
        };
        Self {
            command: command.into(),
            stdout: Output::default(),
            stderr,
            exit_code,
            error: Some(error),
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<Output>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_ok(&self) -> bool {
        !self.is_error()
    }

    pub fn into_result(self) -> Result<Output, ShellError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.stdout),
        }
    }
}
