//! Logging initialization.
//!
//! Logs go to stderr so that stdout carries only the wrapped tool's output.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set. Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(level));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Filter admitting `level` and above. Unknown names fall back to INFO.
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::new(parse_level(level).as_str())
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_all_variants() {
        assert_eq!(parse_level("trace"), tracing::Level::TRACE);
        assert_eq!(parse_level("debug"), tracing::Level::DEBUG);
        assert_eq!(parse_level("info"), tracing::Level::INFO);
        assert_eq!(parse_level("warn"), tracing::Level::WARN);
        assert_eq!(parse_level("warning"), tracing::Level::WARN);
        assert_eq!(parse_level("error"), tracing::Level::ERROR);
    }

    #[test]
    fn parse_level_case_insensitive() {
        assert_eq!(parse_level("DEBUG"), tracing::Level::DEBUG);
        assert_eq!(parse_level("Warning"), tracing::Level::WARN);
    }

    #[test]
    fn parse_level_unknown_defaults_to_info() {
        assert_eq!(parse_level(""), tracing::Level::INFO);
        assert_eq!(parse_level("verbose"), tracing::Level::INFO);
    }

    fn enabled_under(level: &str, event_level: tracing::Level) -> bool {
        use tracing_subscriber::layer::SubscriberExt;

        let subscriber = tracing_subscriber::registry().with(level_filter(level));
        tracing::subscriber::with_default(subscriber, || {
            if event_level == tracing::Level::TRACE {
                tracing::enabled!(target: "alibuild_ops::handle", tracing::Level::TRACE)
            } else if event_level == tracing::Level::DEBUG {
                tracing::enabled!(target: "alibuild_ops::handle", tracing::Level::DEBUG)
            } else if event_level == tracing::Level::INFO {
                tracing::enabled!(target: "alibuild_ops::handle", tracing::Level::INFO)
            } else if event_level == tracing::Level::WARN {
                tracing::enabled!(target: "alibuild_ops::handle", tracing::Level::WARN)
            } else {
                tracing::enabled!(target: "alibuild_ops::handle", tracing::Level::ERROR)
            }
        })
    }

    #[test]
    fn warning_alias_enables_warn_events() {
        assert!(enabled_under("warning", tracing::Level::WARN));
        assert!(enabled_under("warning", tracing::Level::ERROR));
        assert!(!enabled_under("warning", tracing::Level::INFO));
    }

    #[test]
    fn unknown_level_filters_at_info() {
        assert!(enabled_under("verbose", tracing::Level::WARN));
        assert!(enabled_under("verbose", tracing::Level::INFO));
        assert!(!enabled_under("verbose", tracing::Level::DEBUG));
    }

    #[test]
    fn debug_level_enables_debug_events() {
        assert!(enabled_under("DEBUG", tracing::Level::DEBUG));
        assert!(!enabled_under("DEBUG", tracing::Level::TRACE));
    }

    #[test]
    fn init_logging_twice_does_not_panic() {
        init_logging("debug");
        init_logging("info");
    }
}
