//! Tracing subscriber setup for the binary

use std::io::IsTerminal;
use tracing::Level;

/// Install the process-wide subscriber. Logs go to stderr so stdout carries
/// only the requested line.
pub fn init(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}
