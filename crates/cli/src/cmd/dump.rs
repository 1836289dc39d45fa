//! List cached checkpoints

use anyhow::{Context, Result};
use cli_lib::config::Config;
use owo_colors::OwoColorize;
use store::{CheckpointStore, SledStore};
use tracing::debug;

pub fn run(config: &Config) -> Result<()> {
    let store = SledStore::open(&config.cache.dir, &config.cache.name)
        .with_context(|| format!("Failed to open cache '{}'", config.cache.name))?;
    store.initialize().context("Failed to initialize cache")?;

    let entries = store.dump().context("Failed to read cache")?;

    println!(
        "{} {}",
        "Cache".bold(),
        store.path().display().dimmed()
    );
    println!("{} checkpoints\n", entries.len());

    for entry in &entries {
        println!(
            "  {}  line {}  offset {}",
            entry.file.cyan(),
            entry.line.yellow(),
            entry.offset
        );
    }

    store.close().context("Failed to close cache")?;
    Ok(())
}

/// Emit every checkpoint as a debug log line
pub fn log_all<S: CheckpointStore>(store: &S) -> Result<()> {
    for entry in store.dump().context("Failed to read cache")? {
        debug!("{}", entry);
    }
    Ok(())
}
