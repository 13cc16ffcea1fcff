use tracing_subscriber::EnvFilter;

use crate::stderr_buffer::BufferedStderr;

/// Install the global log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` shows info-level
/// events and the default shows warnings only. Output goes through the
/// stderr buffer so the TUI can hold it back while it owns the screen.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("smartbuy={}", default_level)));

    // An already-installed subscriber is left in place
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .with_writer(BufferedStderr)
        .try_init();
}
