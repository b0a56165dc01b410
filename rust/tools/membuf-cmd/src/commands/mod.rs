//! Command implementations for membuf-cmd

use tracing_subscriber::EnvFilter;

pub mod inspect;
pub mod read;
pub mod transcode;

/// Installs the stderr log subscriber. `RUST_LOG` overrides the level
/// derived from the `-v` count.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
