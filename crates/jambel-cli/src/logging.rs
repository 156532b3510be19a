//! Log setup for the binary.

use tracing_subscriber::EnvFilter;

/// Crates whose debug output `--debug` turns on.
const DEBUG_DIRECTIVES: &str = "jambel_protocol=debug,jambel_client=debug,jambel_cli=debug";

/// Level used when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVES: &str = "warn";

/// Pick the filter: `--debug` wins, then `RUST_LOG`, then warnings only.
pub fn filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new(DEBUG_DIRECTIVES)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
    }
}

/// Install the global subscriber. Logs go to stderr.
pub fn init(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
