//! Persistent line checkpoint storage
//!
//! This crate provides:
//! - The `CheckpointStore` capability (initialize, floor lookup, store, dump)
//! - A durable backing on the sled embedded database
//! - An in-memory backing for tests and throwaway runs

pub mod checkpoint;
pub mod error;
pub mod memory;
pub mod sled_store;

// Re-exports
pub use checkpoint::{Checkpoint, StoreOutcome};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use sled_store::SledStore;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Default store name, materialized as `cache.db` by `SledStore`
pub const DEFAULT_STORE_NAME: &str = "cache";

/// Mapping of (file, line number) to the byte offset where that line starts.
///
/// Entries are write-once: storing a key that already exists leaves the
/// existing offset in place and reports `StoreOutcome::Skipped`.
pub trait CheckpointStore {
    /// Prepare the store for first use. Safe to call on an initialized store;
    /// existing entries are never touched.
    fn initialize(&self) -> Result<()>;

    /// Checkpoint with the largest line number `<= line` for `file`.
    fn floor_lookup(&self, file: &str, line: u64) -> Result<Option<Checkpoint>>;

    /// Record `offset` for `(file, line)` unless an entry already exists.
    ///
    /// A `Stored` outcome is durable once this returns.
    fn store(&self, file: &str, line: u64, offset: u64) -> Result<StoreOutcome>;

    /// Every entry in key order, for debugging.
    fn dump(&self) -> Result<Vec<Checkpoint>>;

    /// Flush and release the backing resource.
    ///
    /// Dropping a store also releases it; `close` exists to observe errors.
    fn close(self) -> Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}
