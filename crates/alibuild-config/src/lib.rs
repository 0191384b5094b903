//! Configuration, filesystem paths and logging setup for alibuild-ops.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{
    resolve_executable, Config, DEFAULT_EXECUTABLE, DEFAULT_LOG_LEVEL, DEFAULT_PACKAGE,
};
pub use error::{ConfigError, ConfigResult};
pub use logging::{init_logging, parse_level};
pub use paths::Paths;
