//! CLI command implementations. Each returns the process exit code.

use alibuild_config::Config;
use alibuild_ops::{AliBuild, CommandRunner, ShellOption};

use crate::output::{self, OutputFormat};

pub fn build<R: CommandRunner>(
    handle: &AliBuild<R>,
    args: &[String],
    call_env: &[String],
    format: OutputFormat,
) -> i32 {
    let result = handle.build(&args.join(" "), &call_options(call_env));
    output::print_result(&result, format);
    output::exit_code(&result)
}

pub fn doctor<R: CommandRunner>(
    handle: &AliBuild<R>,
    args: &[String],
    call_env: &[String],
    format: OutputFormat,
) -> i32 {
    let result = handle.doctor(&args.join(" "), &call_options(call_env));
    output::print_result(&result, format);
    output::exit_code(&result)
}

pub fn clean<R: CommandRunner>(handle: &AliBuild<R>, debug: bool, format: OutputFormat) -> i32 {
    let result = handle.clean(debug);
    output::print_result(&result, format);
    output::exit_code(&result)
}

pub fn version<R: CommandRunner>(handle: &AliBuild<R>, format: OutputFormat) -> i32 {
    match handle.version() {
        Ok(version) => {
            output::print(&version, format);
            0
        }
        Err(err) => {
            output::print_error(&err.to_string(), format);
            1
        }
    }
}

pub fn command_help<R: CommandRunner>(
    handle: &AliBuild<R>,
    subcommand: &str,
    format: OutputFormat,
) -> i32 {
    let result = handle.command_help(subcommand);
    output::print_result(&result, format);
    output::exit_code(&result)
}

pub fn help<R: CommandRunner>(handle: &AliBuild<R>, format: OutputFormat) -> i32 {
    let result = handle.help();
    output::print_result(&result, format);
    output::exit_code(&result)
}

pub fn has_fetch_repos<R: CommandRunner>(handle: &AliBuild<R>, format: OutputFormat) -> i32 {
    output::print(&handle.has_fetch_repos_option(), format);
    0
}

pub fn show_config(config: &Config, format: OutputFormat) -> i32 {
    let mut effective = config.clone();
    effective.executable = Some(config.executable());

    match serde_json::to_string_pretty(&effective) {
        Ok(json) if format == OutputFormat::Json => {
            println!("{}", json);
            0
        }
        Ok(_) => {
            println!("executable:  {}", effective.executable.unwrap_or_default());
            println!("package:     {}", effective.package);
            println!("log_level:   {}", effective.log_level);
            for entry in &effective.default_env {
                println!("default_env: {}", entry);
            }
            0
        }
        Err(err) => {
            output::print_error(&err.to_string(), format);
            1
        }
    }
}

/// Per-call options: the `--env` assignments, when any were given.
fn call_options(call_env: &[String]) -> Vec<ShellOption> {
    if call_env.is_empty() {
        Vec::new()
    } else {
        vec![ShellOption::Env(call_env.to_vec())]
    }
}
