// src/logging.rs
//! Diagnostic logging on stderr.

#![deny(missing_docs)]

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count. `quiet` wins.
pub fn filter_directive(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "off",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the flags.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, quiet)));
    // A subscriber may already be installed (tests); keep the first one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(filter_directive(0, false), "warn");
        assert_eq!(filter_directive(1, false), "info");
        assert_eq!(filter_directive(2, false), "debug");
        assert_eq!(filter_directive(7, false), "trace");
        assert_eq!(filter_directive(3, true), "off");
    }
}
