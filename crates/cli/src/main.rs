//! rline - print arbitrary lines of large files, caching line positions

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cli_lib::config::Config;
use std::path::PathBuf;

mod cmd;

/// Prints an arbitrary line from a file.
/// Caches line positions for faster retrieval on later runs.
#[derive(Parser)]
#[command(name = "rline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: ./rline.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// See debug messages and dump the cache after a lookup
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one line of a file
    Get {
        /// File to read
        #[arg(default_value = "input_file.txt")]
        input_file: PathBuf,

        /// Zero-based line number
        #[arg(default_value_t = 0)]
        index: u64,

        /// How often line positions are cached while scanning; 0 caches only the requested line
        #[arg(short = 'i', long)]
        indexing_interval: Option<u64>,

        /// Keep checkpoints in memory for this run only
        #[arg(long)]
        no_cache: bool,

        #[command(flatten)]
        cache: CacheArgs,
    },
    /// List every cached checkpoint
    Dump {
        #[command(flatten)]
        cache: CacheArgs,
    },
    /// Create a text file of random lines (at most 1000 chars each, plus \n)
    Generate {
        /// File to create
        #[arg(short, long, default_value = "input_file.txt")]
        file_name: PathBuf,

        /// Number of lines
        #[arg(short, long, default_value_t = 1_000_000)]
        lines: u64,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the effective configuration
    Config {
        /// Print the default configuration instead
        #[arg(long)]
        example: bool,
    },
}

#[derive(Args)]
struct CacheArgs {
    /// Cache name (stored as <cache-dir>/<name>.db)
    #[arg(long)]
    cache_name: Option<String>,

    /// Directory holding the cache
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.logging.debug |= cli.debug;

    cli_lib::logging::init(config.logging.debug);

    match cli.command {
        Commands::Get { input_file, index, indexing_interval, no_cache, cache } => {
            config.apply_overrides(cache.cache_name, cache.cache_dir, indexing_interval)?;
            cmd::get::run(&input_file, index, no_cache, &config)
        }
        Commands::Dump { cache } => {
            config.apply_overrides(cache.cache_name, cache.cache_dir, None)?;
            cmd::dump::run(&config)
        }
        Commands::Generate { file_name, lines, seed } => {
            cmd::generate::run(&file_name, lines, seed)
        }
        Commands::Config { example } => cmd::config::run(&config, example),
    }
}
