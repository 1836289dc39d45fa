//! Print one line of a file through the checkpoint cache

use anyhow::{Context, Result};
use cli_lib::config::Config;
use reader::LineReader;
use std::path::Path;
use store::{CheckpointStore, MemoryStore, SledStore};
use tracing::{debug, warn};

pub fn run(input_file: &Path, index: u64, no_cache: bool, config: &Config) -> Result<()> {
    if no_cache {
        return lookup(&MemoryStore::new(), input_file, index, config);
    }

    let store = SledStore::open(&config.cache.dir, &config.cache.name).with_context(|| {
        format!(
            "Failed to open cache '{}' in {}",
            config.cache.name,
            config.cache.dir.display()
        )
    })?;
    store.initialize().context("Failed to initialize cache")?;

    let looked_up = lookup(&store, input_file, index, config);
    let closed = store.close().context("Failed to close cache");
    finish(looked_up, closed)
}

/// A lookup failure is reported ahead of a close failure, which is only logged
fn finish(looked_up: Result<()>, closed: Result<()>) -> Result<()> {
    match (looked_up, closed) {
        (Err(e), Err(close_err)) => {
            warn!("{:#}", close_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), closed) => closed,
    }
}

fn lookup<S: CheckpointStore>(
    store: &S,
    input_file: &Path,
    index: u64,
    config: &Config,
) -> Result<()> {
    let reader = LineReader::new(input_file, config.cache.indexing_interval, store);
    let (line, stats) = reader.get_line_with_stats(index)?;

    debug!(
        "Scanned {} lines from line {} (offset {}), wrote {} checkpoints",
        stats.lines_scanned, stats.start_line, stats.start_offset, stats.checkpoints_written
    );

    if config.logging.debug {
        super::dump::log_all(store)?;
    }

    println!("{}", line);
    Ok(())
}
