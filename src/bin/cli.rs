// src/bin/cli.rs
use clap::Parser;
use kaa_notices::cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    Cli::parse().run()
}
