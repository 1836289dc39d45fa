//! Create a random text file

use anyhow::{Context, Result};
use cli_lib::generate::write_lines;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

pub fn run(file_name: &Path, lines: u64, seed: Option<u64>) -> Result<()> {
    let file = File::create(file_name)
        .with_context(|| format!("Failed to create {}", file_name.display()))?;
    let mut out = BufWriter::new(file);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let pb = ProgressBar::new(lines);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} lines {msg}")
            .context("Invalid progress template")?,
    );

    write_lines(&mut out, lines, &mut rng, |written| {
        pb.set_position(written);
        info!("{}%, line {}", written * 100 / lines, written);
    })
    .with_context(|| format!("Failed to write {}", file_name.display()))?;

    pb.finish_and_clear();
    info!("Wrote {} lines to {}", lines, file_name.display());
    Ok(())
}
