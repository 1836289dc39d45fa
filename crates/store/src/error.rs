//! Checkpoint store errors

use thiserror::Error;

/// Failure to open, read or write a checkpoint store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The embedded database could not be opened, read or written
    #[error("checkpoint store I/O failed: {0}")]
    Sled(#[from] sled::Error),

    /// The store name is already used by an incompatible layout
    #[error("store '{name}' holds schema '{found}', expected '{expected}'")]
    SchemaConflict {
        name: String,
        found: String,
        expected: &'static str,
    },

    /// A stored key or value could not be decoded
    #[error("corrupt checkpoint entry: {0}")]
    CorruptEntry(String),

    #[error("file identifier too long for a checkpoint key ({0} bytes)")]
    KeyTooLong(usize),
}
