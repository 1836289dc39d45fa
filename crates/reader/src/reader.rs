//! Seek-and-scan line lookup

use crate::{ReadError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use store::{CheckpointStore, StoreOutcome};
use tracing::{debug, warn};

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Where a lookup started and how much work it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStats {
    /// Line the scan started from (0 when no checkpoint applied)
    pub start_line: u64,
    /// Byte offset the scan started from
    pub start_offset: u64,
    /// Lines read, including the requested one
    pub lines_scanned: u64,
    /// New checkpoints written during the scan
    pub checkpoints_written: u64,
}

/// Reads single lines of one file through a checkpoint store
pub struct LineReader<'a, S: CheckpointStore + ?Sized> {
    path: PathBuf,
    /// Key under which this file's checkpoints are stored
    file_id: String,
    /// Checkpoint every `interval` lines while scanning (0 = only the requested line)
    interval: u64,
    store: &'a S,
}

impl<'a, S: CheckpointStore + ?Sized> LineReader<'a, S> {
    pub fn new(path: impl AsRef<Path>, interval: u64, store: &'a S) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            file_id: path.to_string_lossy().into_owned(),
            path,
            interval,
            store,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Text of line `requested_line` (zero-based) without its terminator
    pub fn get_line(&self, requested_line: u64) -> Result<String> {
        self.get_line_with_stats(requested_line).map(|(line, _)| line)
    }

    /// Like `get_line`, also reporting where the scan started and what it wrote
    pub fn get_line_with_stats(&self, requested_line: u64) -> Result<(String, ScanStats)> {
        let start = self.store.floor_lookup(&self.file_id, requested_line)?;

        let mut file = File::open(&self.path).map_err(|e| self.io_error(e))?;

        let (mut current_line, mut current_offset) = match &start {
            Some(checkpoint) => {
                file.seek(SeekFrom::Start(checkpoint.offset))
                    .map_err(|e| self.io_error(e))?;
                debug!(
                    "Got position {} from line {} for line {}",
                    checkpoint.offset, checkpoint.line, requested_line
                );
                (checkpoint.line, checkpoint.offset)
            }
            None => (0, 0),
        };

        let mut stats = ScanStats {
            start_line: current_line,
            start_offset: current_offset,
            ..ScanStats::default()
        };

        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| self.io_error(e))?;

            if n == 0 {
                return Err(ReadError::EndOfFile {
                    lines: current_line,
                });
            }
            stats.lines_scanned += 1;

            if current_line == requested_line {
                self.checkpoint(current_line, current_offset, &mut stats);
                strip_terminator(&mut buf);
                let text = String::from_utf8(buf).map_err(|e| ReadError::Encoding {
                    line: current_line,
                    source: e.utf8_error(),
                })?;
                return Ok((text, stats));
            }

            if current_line > 0 && self.interval > 0 && current_line % self.interval == 0 {
                self.checkpoint(current_line, current_offset, &mut stats);
            }

            current_line += 1;
            current_offset += n as u64;
        }
    }

    /// Record a checkpoint. A failed write only costs future lookups time,
    /// so it is logged and the scan carries on.
    fn checkpoint(&self, line: u64, offset: u64, stats: &mut ScanStats) {
        match self.store.store(&self.file_id, line, offset) {
            Ok(StoreOutcome::Stored) => stats.checkpoints_written += 1,
            Ok(StoreOutcome::Skipped { .. }) => {}
            Err(e) => warn!(
                "Failed to store checkpoint for file '{}', line {}: {}",
                self.file_id, line, e
            ),
        }
    }

    fn io_error(&self, source: std::io::Error) -> ReadError {
        ReadError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Drop a trailing `\n` or `\r\n`
fn strip_terminator(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}
