//! # Inspect
//!
//! Command line front end of the engine: loads the configuration, builds an [`Engine`], applies
//! command line overrides and prints the resolved flags.

mod args;
mod report;

pub use crate::args::Cli;
pub use crate::report::Report;

use anyhow::{Context, Result};
use capflags::Engine;
use capflags::domain::config::{EngineConfig, LoggingConfig};
use capflags::kernel::overrides::parse_assignment;
use capflags_logger::{LevelFilter, Logger, LoggerError, parse_level};
use tracing::{debug, info};

/// Installs logging as described by `logging`, with `level` taking precedence over
/// `logging.level`.
///
/// # Errors
/// Returns [`LoggerError`] if the level or filter does not parse or a subscriber is already set.
pub fn init_logging(logging: &LoggingConfig, level: Option<&str>) -> Result<Logger, LoggerError> {
    let level: LevelFilter = parse_level(level.unwrap_or(&logging.level))?;
    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level);
    let builder = match logging.filter.as_deref() {
        Some(filter) => builder.env_filter(filter),
        None => builder,
    };

    match &logging.directory {
        Some(directory) if logging.json => builder.path(directory).json().init(),
        Some(directory) => builder.path(directory).init(),
        None => builder.init(),
    }
}

/// Builds the engine for `config`, applies the command line and collects the report.
///
/// # Errors
/// Fails on a malformed `--set`, an unknown flag or a flag that cannot be resolved.
pub fn inspect(cli: &Cli, config: EngineConfig) -> Result<Report> {
    let engine = Engine::builder().config(config).build().context("Failed to build engine")?;

    let overrides = cli
        .overrides
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid --set")?;
    let applied = engine.registry.apply_overrides(overrides).context("Rejected --set")?;
    debug!(applied, "Command line overrides applied");

    if cli.force_half_float {
        engine.force_half_float()?;
    }

    let flags = if cli.flags.is_empty() {
        engine.snapshot()?
    } else {
        cli.flags
            .iter()
            .map(|name| engine.registry.get(name).map(|value| (name.clone(), value)))
            .collect::<Result<_, _>>()?
    };

    info!(flags = flags.len(), probes = engine.probes().len(), "Flags resolved");

    Ok(Report { flags, probes: cli.probes.then(|| engine.probes().snapshot()) })
}

/// Renders `report` the way `cli` asks for.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render(cli: &Cli, report: &Report) -> Result<String> {
    if cli.json { Ok(report.to_json()?) } else { Ok(report.to_table()) }
}
