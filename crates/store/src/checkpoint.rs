//! Checkpoint data structures and their on-disk key encoding

use crate::{Result, StoreError};
use std::fmt;

/// Byte offset of the start of one line in one file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint {
    /// File identifier as given by the caller
    pub file: String,
    /// Zero-based line number
    pub line: u64,
    /// Offset of the first byte of the line, from the start of the file
    pub offset: u64,
}

impl Checkpoint {
    pub fn new(file: impl Into<String>, line: u64, offset: u64) -> Self {
        Self {
            file: file.into(),
            line,
            offset,
        }
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} @ {}", self.file, self.line, self.offset)
    }
}

/// Result of a `CheckpointStore::store` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// New entry written and flushed
    Stored,
    /// Key already present; the existing offset was kept
    Skipped { existing: u64 },
}

impl StoreOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, StoreOutcome::Stored)
    }
}

/// Encode `(file, line)` as an ordered byte key.
///
/// Layout: `u32 BE file length | file bytes | u64 BE line`. Within one file
/// the keys sort by line number, and the length prefix stops one file's keys
/// from interleaving with those of a file whose name extends it.
pub(crate) fn encode_key(file: &str, line: u64) -> Result<Vec<u8>> {
    let len = u32::try_from(file.len()).map_err(|_| StoreError::KeyTooLong(file.len()))?;

    let mut key = Vec::with_capacity(4 + file.len() + 8);
    key.extend_from_slice(&len.to_be_bytes());
    key.extend_from_slice(file.as_bytes());
    key.extend_from_slice(&line.to_be_bytes());
    Ok(key)
}

/// Inverse of `encode_key`
pub(crate) fn decode_key(key: &[u8]) -> Result<(String, u64)> {
    let corrupt = || StoreError::CorruptEntry(format!("malformed key of {} bytes", key.len()));

    let len_bytes: [u8; 4] = key.get(..4).ok_or_else(corrupt)?.try_into().map_err(|_| corrupt())?;
    let len = u32::from_be_bytes(len_bytes) as usize;

    if key.len() != 4 + len + 8 {
        return Err(corrupt());
    }

    let file = std::str::from_utf8(&key[4..4 + len])
        .map_err(|_| StoreError::CorruptEntry("file identifier is not UTF-8".to_string()))?
        .to_string();
    let line_bytes: [u8; 8] = key[4 + len..].try_into().map_err(|_| corrupt())?;

    Ok((file, u64::from_be_bytes(line_bytes)))
}

pub(crate) fn encode_offset(offset: u64) -> [u8; 8] {
    offset.to_be_bytes()
}

pub(crate) fn decode_offset(value: &[u8]) -> Result<u64> {
    let bytes: [u8; 8] = value.try_into().map_err(|_| {
        StoreError::CorruptEntry(format!("offset value of {} bytes", value.len()))
    })?;
    Ok(u64::from_be_bytes(bytes))
}
