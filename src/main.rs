//! alembic - potion brewing and monster hunting from the command line

use alembic::{AlembicConfig, Session};
use anyhow::{Context, Result};
use clap::Parser;
use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Alchemy and bestiary bookkeeping game", long_about = None)]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, default_value = alembic::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Starting bucket count of every collection (overrides the config file)
    #[arg(long)]
    capacity: Option<usize>,

    /// Do not print the prompt
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the game transcript.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let mut config = AlembicConfig::load_from_path(&args.config);
    if let Some(capacity) = args.capacity {
        config.initial_capacity = capacity.max(1);
    }
    if args.quiet {
        config.show_prompt = false;
    }
    info!(?config, "starting alembic v{}", env!("CARGO_PKG_VERSION"));

    let session = Session::new(&config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            session.run(BufReader::new(file), &mut out)?
        }
        None => session.run(io::stdin().lock(), &mut out)?,
    };
    info!(
        lines = summary.lines_read,
        invalid = summary.invalid_lines,
        released = summary.released.total(),
        "session closed"
    );
    Ok(())
}
