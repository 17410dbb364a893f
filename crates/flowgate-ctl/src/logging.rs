//! stderr logging. stdout is reserved for the operator-facing result line.

use tracing_subscriber::EnvFilter;

const QUIET: &str = "warn";
const VERBOSE: &str = "warn,flowgate_ctl=debug";

/// `RUST_LOG` wins over `--verbose`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { VERBOSE } else { QUIET }));

    // Ignored if a subscriber is already installed (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
