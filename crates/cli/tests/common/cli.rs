//! Runs the `rline` binary built for this test run

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// One invocation of `rline` inside a scratch directory
pub struct Rline {
    command: Command,
    args: Vec<String>,
}

impl Rline {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let mut command = Command::new(env!("CARGO_BIN_EXE_rline"));
        command.current_dir(dir.as_ref());
        Self {
            command,
            args: Vec::new(),
        }
    }

    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.command.args(args);
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    fn run(&mut self) -> Result<Output> {
        let output = self
            .command
            .output()
            .with_context(|| format!("Failed to run rline {:?}", self.args))?;

        Ok(Output {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }

    /// Run and require a zero exit status
    pub fn assert_success(&mut self) -> Result<Output> {
        let output = self.run()?;
        if !output.success {
            bail!(
                "rline {:?} failed\nstdout: {}\nstderr: {}",
                self.args,
                output.stdout,
                output.stderr
            );
        }
        Ok(output)
    }

    /// Run and require a non-zero exit status
    pub fn assert_failure(&mut self) -> Result<Output> {
        let output = self.run()?;
        if output.success {
            bail!("rline {:?} should have failed\nstdout: {}", self.args, output.stdout);
        }
        Ok(output)
    }
}

/// Captured output of a finished run
pub struct Output {
    pub stdout: String,
    pub stderr: String,
    success: bool,
}

impl Output {
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }
}

/// `rline!(dir, "get", "input.txt", "3")` builds an invocation in `dir`
#[macro_export]
macro_rules! rline {
    ($dir:expr, $($arg:expr),*) => {{
        let mut rline = $crate::common::cli::Rline::new($dir);
        rline.args(&[$($arg),*]);
        rline
    }};
}
