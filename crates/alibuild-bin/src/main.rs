//! alibuild-ops - run aliBuild subcommands through a configured handle.

mod commands;
mod output;

use std::path::PathBuf;

use alibuild_config::{init_logging, Config, Paths};
use clap::{Parser, Subcommand};

/// aliBuild wrapper command-line interface.
#[derive(Parser)]
#[command(name = "alibuild-ops")]
#[command(about = "Run aliBuild subcommands with a configured package and environment")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error). Defaults to the configured level
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Base directory for the config file. Defaults to ~/.alibuild-ops
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// aliBuild executable to invoke. Overrides the configured one and ALIBUILD_PATH
    #[arg(long, global = true)]
    exe: Option<String>,

    /// Package the subcommands act upon
    #[arg(short, long, global = true)]
    package: Option<String>,

    /// Extra KEY=VALUE assignment for build and doctor (repeatable)
    #[arg(short, long = "env", global = true, value_name = "KEY=VALUE")]
    env: Vec<String>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the package
    Build {
        /// Arguments passed to aliBuild before the package name. Everything after
        /// the subcommand is passed through, flags included, so global options
        /// such as --env must come before the subcommand
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Check the package's system requirements
    Doctor {
        /// Arguments passed to aliBuild before the package name. Everything after
        /// the subcommand is passed through, flags included, so global options
        /// such as --env must come before the subcommand
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Remove obsolete build artifacts
    Clean {
        /// Ask aliBuild for debug output
        #[arg(long)]
        debug: bool,
    },
    /// Print the aliBuild version
    Version,
    /// Show aliBuild's help for one of its subcommands
    HelpFor {
        /// aliBuild subcommand name
        subcommand: String,
    },
    /// Show aliBuild's top-level help
    ToolHelp,
    /// Report whether `aliBuild build` supports --fetch-repos
    HasFetchRepos,
    /// Print the effective configuration
    ShowConfig,
}

/// Layer explicit command-line values over the loaded configuration.
fn apply_overrides(config: &mut Config, exe: Option<String>, package: Option<String>) {
    if let Some(exe) = exe {
        config.executable = Some(exe);
    }
    if let Some(package) = package {
        config.package = package;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        command,
        log_level,
        base_dir,
        exe,
        package,
        env: call_env,
        format,
    } = Cli::parse();

    let paths = match base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    let mut config = Config::load(&paths)?;
    apply_overrides(&mut config, exe, package);

    init_logging(log_level.as_deref().unwrap_or(&config.log_level));
    tracing::debug!(config_file = %paths.config_file().display(), "configuration loaded");

    let handle = config.handle();

    let exit_code = match command {
        Commands::Build { args } => commands::build(&handle, &args, &call_env, format),
        Commands::Doctor { args } => commands::doctor(&handle, &args, &call_env, format),
        Commands::Clean { debug } => commands::clean(&handle, debug, format),
        Commands::Version => commands::version(&handle, format),
        Commands::HelpFor { subcommand } => commands::command_help(&handle, &subcommand, format),
        Commands::ToolHelp => commands::help(&handle, format),
        Commands::HasFetchRepos => commands::has_fetch_repos(&handle, format),
        Commands::ShowConfig => commands::show_config(&config, format),
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
