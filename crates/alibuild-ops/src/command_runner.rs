use crate::shell::{resolve_env, resolve_working_dir};
use crate::{Output, ShellError, ShellOption, ShellResult};
use std::process::{Command, Stdio};

/// Exit status POSIX shells use for "command not found".
const SHELL_COMMAND_NOT_FOUND: i32 = 127;

/// Something that can execute a formatted command line.
pub trait CommandRunner {
    fn run(&self, command: &str, options: &[ShellOption]) -> ShellResult;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &str, options: &[ShellOption]) -> ShellResult {
        (**self).run(command, options)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run(&self, command: &str, options: &[ShellOption]) -> ShellResult {
        (**self).run(command, options)
    }
}

/// Runs command lines through a POSIX shell and captures their output.
#[derive(Debug, Clone)]
pub struct ShellCommandRunner {
    shell: String,
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self::with_shell("sh")
    }

    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run(&self, command: &str, options: &[ShellOption]) -> ShellResult {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.envs(resolve_env(options));

        if let Some(dir) = resolve_working_dir(options) {
            cmd.current_dir(dir);
        }

        let output = match cmd.output() {
            Ok(output) => output,
            Err(err) => {
                let error = if err.kind() == std::io::ErrorKind::NotFound {
                    ShellError::ExecutableNotFound {
                        command: command.to_string(),
                    }
                } else {
                    ShellError::SpawnFailed {
                        command: command.to_string(),
                        message: err.to_string(),
                    }
                };
                tracing::debug!(command, error = %error, "command could not be started");
                return ShellResult::failure(command, error);
            }
        };

        let stdout = Output::new(String::from_utf8_lossy(&output.stdout));
        let stderr = Output::new(String::from_utf8_lossy(&output.stderr));
        let exit_code = output.status.code();
        tracing::debug!(command, ?exit_code, "command finished");

        let error = classify_exit(command, exit_code, stderr.text(false));

        ShellResult {
            command: command.to_string(),
            stdout,
            stderr,
            exit_code,
            error,
        }
    }
}

fn classify_exit(command: &str, exit_code: Option<i32>, stderr: &str) -> Option<ShellError> {
    match exit_code {
        Some(0) => None,
        Some(SHELL_COMMAND_NOT_FOUND) => Some(ShellError::ExecutableNotFound {
            command: command.to_string(),
        }),
        Some(code) => Some(ShellError::NonZeroExit {
            command: command.to_string(),
            exit_code: code,
            stderr: stderr.trim().to_string(),
        }),
        None => Some(ShellError::Terminated {
            command: command.to_string(),
        }),
    }
}
