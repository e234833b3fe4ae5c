use tracing_subscriber::{fmt, EnvFilter};

/// Installs the stderr log subscriber used by the binaries.
///
/// With no `-v` flags the filter comes from `RUST_LOG`, falling back to
/// `warn`. Each `-v` raises the level: info, debug, then trace.
pub fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
}
