//! Show configuration

use anyhow::{Context, Result};
use cli_lib::config::{self, Config};

pub fn run(config: &Config, example: bool) -> Result<()> {
    let rendered = if example {
        config::example_config()?
    } else {
        toml::to_string_pretty(config).context("Failed to render config")?
    };
    print!("{}", rendered);
    Ok(())
}
