//! `calendar` binary: an interactive calendar on stdin/stdout.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `calendar-config.yaml` (or `$CALENDAR_CONFIG`)
//! 2. Initialize structured logging (tracing) on stderr
//! 3. Run the REPL until `exit` or end of input

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use calendar_cli::config::{CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH, LogFormat};
use calendar_cli::{CliConfig, Repl};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // 1. Load configuration. Logging is not up yet, so report after init.
    let (config, path, found) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);
    match config.logging.format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    info!(
        path = %path.display(),
        found,
        default_zone = %config.display.default_zone,
        "Configuration loaded"
    );

    // 3. Run the REPL.
    let mut repl = Repl::new(config, io::stdout().lock());
    repl.run(io::stdin().lock())
        .context("terminal I/O failed")?;

    info!(events = repl.calendar().len(), "calendar exiting");
    Ok(())
}

/// Load configuration from the configured path.
///
/// A missing file is not an error: defaults (plus env overrides) are used.
fn load_config() -> anyhow::Result<(CliConfig, PathBuf, bool)> {
    let path = std::env::var_os(CONFIG_PATH_VAR)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if path.exists() {
        let config = CliConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        Ok((config, path, true))
    } else {
        let config = CliConfig::from_env().context("applying environment overrides")?;
        Ok((config, path, false))
    }
}
