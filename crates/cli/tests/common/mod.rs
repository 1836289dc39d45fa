//! Common utilities for integration tests

pub mod cli;

use std::fs;
use std::path::{Path, PathBuf};

/// Write `lines` to `dir/name`, each terminated by `\n`
pub fn write_lines(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(&path, content).expect("Failed to write test file");
    path
}
