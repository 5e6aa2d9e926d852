//! Command line entry point for the passive mobs generator.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use passive_mobs::{init_logging, PipelineConfig};

/// Neutralises player targeting in vanilla monster definitions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (default: ./passive_mobs.toml, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = PipelineConfig::load(args.config.as_deref()).context("loading configuration")?;
    debug!("Using {config:?}");

    passive_mobs::run(&config, io::stdout().lock()).with_context(|| {
        format!(
            "generating entities into {}",
            config.output_dir.display()
        )
    })?;
    Ok(())
}
