#![allow(clippy::print_stdout)]

use anyhow::Context;
use capflags::domain::config::EngineConfig;
use capflags::kernel::config::load_config;
use capflags_inspect::{Cli, init_logging, inspect, render};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg: EngineConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;

    let _log = init_logging(&cfg.logging, cli.log_level.as_deref())?;

    let report = inspect(&cli, cfg)?;
    println!("{}", render(&cli, &report)?);

    Ok(())
}
