use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gambit_uci::UciEngine;

fn main() -> Result<()> {
    // stdout carries the UCI protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("gambit starting");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    UciEngine::new().run(stdin.lock(), &mut stdout)?;
    Ok(())
}
