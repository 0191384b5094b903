//! Output formatting for the CLI.

use std::io::Write;

use alibuild_ops::{ShellError, ShellResult};
use clap::ValueEnum;
use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a value in the specified format.
pub fn print<T: Serialize + std::fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => print_json(value),
    }
}

/// Print a command result: captured streams for text, the whole result for JSON.
pub fn print_result(result: &ShellResult, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            print!("{}", result.stdout.text(false));
            let _ = std::io::stdout().flush();
            eprint!("{}", result.stderr.text(false));
            if let Some(err) = &result.error {
                eprintln!("Error: {}", error_line(err));
            }
        }
        OutputFormat::Json => print_json(result),
    }
}

/// One-line failure summary. The stderr carried by a non-zero exit has
/// already been printed with the result, so it is left out here.
fn error_line(err: &ShellError) -> String {
    match err {
        ShellError::NonZeroExit {
            command, exit_code, ..
        } => format!("`{}` exited with status {}", command, exit_code),
        other => other.to_string(),
    }
}

/// Print an error message.
pub fn print_error(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("Error: {}", message),
        OutputFormat::Json => {
            let payload = serde_json::json!({ "status": "error", "message": message });
            eprintln!("{}", payload);
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("Error: failed to serialize output: {}", err),
    }
}

/// Process exit code for a finished command.
pub fn exit_code(result: &ShellResult) -> i32 {
    match (&result.error, result.exit_code) {
        (None, _) => 0,
        (Some(_), Some(code)) if code != 0 => code,
        (Some(_), _) => 1,
    }
}
