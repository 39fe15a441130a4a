use anyhow::{Context, Result};
use std::io::{self, Read, Write};
use tabtree::cli;
use tabtree::config::Config;
use tabtree::script::{ScriptRunner, parse_script};

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };

    let config = match &options.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    // CLI --log-level takes precedence, then RUST_LOG, then the config file
    let level = options.log_level.or_else(|| {
        std::env::var_os("RUST_LOG")
            .is_none()
            .then(|| config.log_level.to_level_filter())
    });
    tabtree::debug::init_log_bridge(level);
    log::info!("Starting tabtree {}", tabtree::VERSION);

    let text = match &options.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read script from stdin")?;
            text
        }
    };
    let commands = parse_script(&text)?;

    let (width, height) = options.size;
    let mut runner = ScriptRunner::new(&config, width, height);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    runner.run(&commands, &mut out)?;

    if options.json {
        serde_json::to_writer_pretty(&mut out, &runner.snapshot())?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", runner.render_tree())?;
    }
    log::info!("Script finished: {} command(s)", commands.len());
    Ok(())
}
