//! # aliBuild Ops
//!
//! Typed orchestration of the ALICE `aliBuild` command-line tool.
//!
//! [`AliBuild`] formats one shell command line per aliBuild subcommand and
//! hands it to a [`CommandRunner`]. The runner owns process execution and
//! output capture; the handle never inspects results beyond the version line
//! and the `fetch-repos` check.

mod command_runner;
mod error;
mod handle;
mod mock_runner;
mod shell;

pub use command_runner::{CommandRunner, ShellCommandRunner};
pub use error::ShellError;
pub use handle::{AliBuild, FETCH_REPOS_OPTION};
pub use mock_runner::MockRunner;
pub use shell::{Output, ShellOption, ShellResult};
