//! Diagnostic logging to stderr

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// With no `-v` flags `RUST_LOG` is honoured, falling back to `warn`.
/// Each `-v` raises the level: info, debug, then trace.
pub fn init_logging(verbosity: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        level => EnvFilter::new(level_name(level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}

fn level_name(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
