//! Line lookup errors

use std::io;
use std::path::PathBuf;
use store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    /// The file ends before the requested line
    #[error("File has only {lines} lines")]
    EndOfFile { lines: u64 },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The requested line is not valid UTF-8
    #[error("line {line} is not valid UTF-8: {source}")]
    Encoding {
        line: u64,
        #[source]
        source: std::str::Utf8Error,
    },
}

impl ReadError {
    /// Line count of the file, if this is an end-of-file failure
    pub fn lines_present(&self) -> Option<u64> {
        match self {
            ReadError::EndOfFile { lines } => Some(*lines),
            _ => None,
        }
    }
}
