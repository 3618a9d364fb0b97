//! # CLI Argument Definitions

use clap::Parser;
use std::path::PathBuf;

/// Resolves capability flags for the configured device and prints them.
#[derive(Debug, Parser)]
#[command(name = "capflags")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve and inspect capability flags")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON). Defaults to `capflags.*` in the working directory
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override a flag, e.g. `--set GPU_PACK=false`. Applied after configured overrides
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    pub overrides: Vec<String>,

    /// Force 16-bit float textures before resolving
    #[arg(long)]
    pub force_half_float: bool,

    /// Only print these flags
    #[arg(short, long = "flag", value_name = "NAME")]
    pub flags: Vec<String>,

    /// Include the cached hardware answers
    #[arg(long)]
    pub probes: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Log level; defaults to `logging.level` from the configuration
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["capflags"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.overrides.is_empty());
        assert!(!cli.force_half_float && !cli.json && !cli.probes);
    }

    #[test]
    fn repeated_overrides_and_flags() {
        let cli = Cli::try_parse_from([
            "capflags",
            "--set",
            "GPU_PACK=false",
            "-s",
            "GPU_FLUSH_THRESHOLD=2",
            "--flag",
            "HAS_GPU",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.overrides, ["GPU_PACK=false", "GPU_FLUSH_THRESHOLD=2"]);
        assert_eq!(cli.flags, ["HAS_GPU"]);
        assert!(cli.json);
    }

    #[test]
    fn rejects_unknown_arguments() {
        assert!(Cli::try_parse_from(["capflags", "--verbose-gpu"]).is_err());
    }
}
