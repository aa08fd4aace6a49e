//! Process-wide `tracing` subscriber.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber writing to stderr.
///
/// `verbose` honours `RUST_LOG` and defaults to `debug`; otherwise only `info` and above from this
/// crate are shown. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("schedreel=debug"))
    } else {
        EnvFilter::new("schedreel=info,warn")
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
