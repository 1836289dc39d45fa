//! Durable checkpoint store using sled

use crate::checkpoint::{decode_key, decode_offset, encode_key, encode_offset};
use crate::{Checkpoint, CheckpointStore, Result, StoreError, StoreOutcome};
use sled::{CompareAndSwapError, Db, Tree};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Schema marker written by `initialize`
const SCHEMA: &str = "line-checkpoints/v1";
const SCHEMA_KEY: &[u8] = b"schema";

/// Checkpoint store backed by a sled database at `<dir>/<name>.db`
///
/// ```text
/// <name>.db/
///   meta          schema marker
///   checkpoints   (file, line) -> offset
/// ```
pub struct SledStore {
    /// Store name (the database directory stem)
    name: String,
    path: PathBuf,
    db: Db,
    meta: Tree,
    checkpoints: Tree,
}

impl SledStore {
    /// Open or create the store named `name` inside `dir`
    pub fn open(dir: &Path, name: &str) -> Result<Self> {
        Self::open_path(name, dir.join(format!("{}.db", name)))
    }

    /// Open or create a store at an explicit database path
    pub fn open_path(name: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let db = sled::open(&path)?;
        let meta = db.open_tree("meta")?;
        let checkpoints = db.open_tree("checkpoints")?;

        debug!("Opened checkpoint store '{}' at {}", name, path.display());

        Ok(Self {
            name: name.to_string(),
            path,
            db,
            meta,
            checkpoints,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored checkpoints across all files
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}

impl CheckpointStore for SledStore {
    fn initialize(&self) -> Result<()> {
        let swapped = self
            .meta
            .compare_and_swap(SCHEMA_KEY, None::<&[u8]>, Some(SCHEMA.as_bytes()))?;

        match swapped {
            Ok(()) => {
                self.meta.flush()?;
                debug!("Created checkpoint schema in store '{}'", self.name);
                Ok(())
            }
            Err(CompareAndSwapError {
                current: Some(found),
                ..
            }) if found.as_ref() == SCHEMA.as_bytes() => Ok(()),
            Err(CompareAndSwapError { current, .. }) => Err(StoreError::SchemaConflict {
                name: self.name.clone(),
                found: current
                    .map(|v| String::from_utf8_lossy(&v).into_owned())
                    .unwrap_or_default(),
                expected: SCHEMA,
            }),
        }
    }

    fn floor_lookup(&self, file: &str, line: u64) -> Result<Option<Checkpoint>> {
        let lo = encode_key(file, 0)?;
        let hi = encode_key(file, line)?;

        // Last key in [file:0, file:line] is the floor
        let (key, value) = match self.checkpoints.range(lo..=hi).next_back() {
            Some(item) => item?,
            None => return Ok(None),
        };

        let (_, found_line) = decode_key(&key)?;
        let offset = decode_offset(&value)?;
        Ok(Some(Checkpoint::new(file, found_line, offset)))
    }

    fn store(&self, file: &str, line: u64, offset: u64) -> Result<StoreOutcome> {
        let key = encode_key(file, line)?;

        // Insert only if absent; a concurrent writer that got there first wins
        let swapped = self.checkpoints.compare_and_swap(
            key,
            None::<&[u8]>,
            Some(&encode_offset(offset)[..]),
        )?;

        match swapped {
            Ok(()) => {
                self.checkpoints.flush()?;
                debug!(
                    "Stored position '{}' for file '{}', line '{}'",
                    offset, file, line
                );
                Ok(StoreOutcome::Stored)
            }
            Err(CompareAndSwapError { current, .. }) => {
                let existing = match current {
                    Some(value) => decode_offset(&value)?,
                    None => {
                        return Err(StoreError::CorruptEntry(format!(
                            "insert of {}:{} rejected without an existing value",
                            file, line
                        )))
                    }
                };
                debug!(
                    "Skip storing position '{}' for file '{}', line '{}'. \
                     Already contains value '{}'",
                    offset, file, line, existing
                );
                Ok(StoreOutcome::Skipped { existing })
            }
        }
    }

    fn dump(&self) -> Result<Vec<Checkpoint>> {
        let mut entries = Vec::with_capacity(self.checkpoints.len());
        for item in self.checkpoints.iter() {
            let (key, value) = item?;
            let (file, line) = decode_key(&key)?;
            entries.push(Checkpoint {
                file,
                line,
                offset: decode_offset(&value)?,
            });
        }
        Ok(entries)
    }

    fn close(self) -> Result<()> {
        self.db.flush()?;
        debug!("Closed checkpoint store '{}'", self.name);
        Ok(())
    }
}

impl Drop for SledStore {
    fn drop(&mut self) {
        // Release on every exit path, including unwinding out of a failed lookup
        if let Err(e) = self.db.flush() {
            warn!("Failed to flush checkpoint store '{}': {}", self.name, e);
        }
    }
}
