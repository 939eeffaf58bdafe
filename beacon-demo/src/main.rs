use std::error::Error;

use beacon_demo::Cli;
use clap::Parser;
use tracing::metadata::LevelFilter;

fn main() -> Result<(), Box<dyn Error>> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();

    run(cli)
}

#[cfg(target_vendor = "apple")]
fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    beacon_demo::apple::run(cli.config())
}

#[cfg(not(target_vendor = "apple"))]
fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    tracing::debug!(?cli, "parsed arguments");
    Err("beacon-demo requires CoreLocation and CoreBluetooth (macOS or iOS)".into())
}
