//! Diagnostic logging
//!
//! Events go to stderr so stdout stays clean for tables, JSON and exports.

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "HERBICALIB_LOG";

/// Default directive for a verbosity level
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "herbicalib=info",
        Verbosity::Debug => "herbicalib=debug",
    }
}

/// Install the global subscriber. `HERBICALIB_LOG` wins over `verbosity`.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_parse() {
        for verbosity in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Debug,
        ] {
            assert!(default_directive(verbosity)
                .parse::<tracing_subscriber::filter::Directive>()
                .is_ok());
        }
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(Verbosity::Normal);
        init(Verbosity::Debug);
    }
}
