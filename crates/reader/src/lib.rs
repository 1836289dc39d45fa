//! Random access to lines of large text files
//!
//! A lookup seeks to the closest stored checkpoint at or before the requested
//! line and scans forward from there, recording new checkpoints as it goes so
//! later lookups on the same file start closer to their target.

pub mod error;
pub mod reader;

// Re-exports
pub use error::ReadError;
pub use reader::{LineReader, ScanStats};

use std::path::Path;
use store::CheckpointStore;

/// Result type for reader operations
pub type Result<T> = std::result::Result<T, ReadError>;

/// Default stride, in lines, between checkpoints recorded during a scan
pub const DEFAULT_INDEXING_INTERVAL: u64 = 1000;

/// Read line `line` (zero-based) of `path`, using and extending the
/// checkpoints in `store`. The store must already be initialized.
pub fn get_line<S>(
    store: &S,
    path: impl AsRef<Path>,
    line: u64,
    interval: u64,
) -> Result<String>
where
    S: CheckpointStore + ?Sized,
{
    LineReader::new(path, interval, store).get_line(line)
}
