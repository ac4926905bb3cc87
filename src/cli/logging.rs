//! Diagnostic logging setup.
//!
//! Fold decisions and timings are emitted as `tracing` events. They are
//! hidden by default, shown at debug level with `--verbose`, and fully
//! controllable through `RUST_LOG`.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn default_level(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::WARN }
}

/// Install the global subscriber, writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("intlx={}", default_level(verbose)))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
