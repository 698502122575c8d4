pub mod config_file;
pub mod render;
pub mod seed;

use std::io;

use tracing_subscriber::EnvFilter;

/// Format a dungeon fingerprint as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_fingerprint(fingerprint: u64) -> String {
    format!("0x{fingerprint:016x}")
}

/// Installs the stderr log subscriber shared by every binary. `RUST_LOG` wins
/// over the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second install (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}
