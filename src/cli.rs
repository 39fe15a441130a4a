//! Command-line interface for tabtree.
//!
//! The binary is a headless driver: it builds one tab backed by in-memory
//! surfaces, replays a command script against it, and prints the resulting
//! layout. A subcommand writes the default configuration file.

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tabtree - split-pane tree and tab coordinator, driven from a script
#[derive(Parser)]
#[command(name = "tabtree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,

    /// Initial content size in pixels
    #[arg(long, value_name = "WxH", default_value = "800x600", value_parser = parse_size)]
    pub size: (f32, f32),

    /// Print the final layout as JSON instead of a text tree
    #[arg(long)]
    pub json: bool,

    /// Command script to run (reads stdin when omitted)
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration file
    InitConfig {
        /// Where to write it (default: the standard config location)
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Runtime options passed from CLI to the driver
#[derive(Clone, Debug)]
pub struct RuntimeOptions {
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
    /// Initial content size (width, height)
    pub size: (f32, f32),
    /// Emit JSON instead of a text tree
    pub json: bool,
    /// Script file; `None` reads stdin
    pub script: Option<PathBuf>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with the script run
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments and handle subcommands
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::InitConfig { path, force }) => match init_config(path, force) {
            Ok(()) => CliResult::Exit(0),
            Err(e) => {
                eprintln!("tabtree: error: {e:#}");
                CliResult::Exit(1)
            }
        },
        None => CliResult::Continue(RuntimeOptions {
            config: cli.config,
            log_level: cli.log_level.map(|l| l.to_level_filter()),
            size: cli.size,
            json: cli.json,
            script: cli.script,
        }),
    }
}

/// Write the default configuration
fn init_config(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(Config::config_path);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Parse a `WIDTHxHEIGHT` pixel size
pub fn parse_size(value: &str) -> Result<(f32, f32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| format!("invalid size component '{part}' in '{value}'"))
    };
    Ok((parse(width)?, parse(height)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("800x600"), Ok((800.0, 600.0)));
        assert_eq!(parse_size("1024X768.5"), Ok((1024.0, 768.5)));
        assert!(parse_size("800").is_err());
        assert!(parse_size("-1x10").is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["tabtree", "--size", "400x300", "--json", "layout.txt"]);
        assert_eq!(cli.size, (400.0, 300.0));
        assert!(cli.json);
        assert_eq!(cli.script, Some(PathBuf::from("layout.txt")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_init_config_refuses_to_overwrite_without_force() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.yaml");

        init_config(Some(path.clone()), false).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        std::fs::write(&path, "pane_min_size: 3\n").unwrap();
        assert!(init_config(Some(path.clone()), false).is_err());
        assert_eq!(Config::load_from(&path).unwrap().pane_min_size, 3);

        init_config(Some(path.clone()), true).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
