//! Runtime configuration
//!
//! Manages process-level settings:
//! - Where the command object is read from
//! - Log level and the diagnostic stream
//! - Output formatting

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Default log level when neither the flag nor the environment sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Environment variable holding an `env_logger` filter string
pub const LOG_ENV_VAR: &str = "SMARTFILE_LOG";

/// Command line arguments for the backend
#[derive(Parser, Debug, Clone)]
#[command(
    name = "smartfile",
    about = "Runs one bulk file operation described by a JSON command",
    version
)]
pub struct Settings {
    /// Read the command from this file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Log level for the diagnostic stream (stderr)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: LevelFilter,

    /// Pretty-print the result object
    #[arg(long)]
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: None,
            log_level: LevelFilter::Warn,
            pretty: false,
        }
    }
}

impl Settings {
    /// Read the raw command text from `--input` or stdin
    pub fn read_input(&self) -> anyhow::Result<String> {
        match &self.input {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read command from {}", path.display())),
            None => {
                let mut input = String::new();
                io::stdin()
                    .read_to_string(&mut input)
                    .context("failed to read command from stdin")?;
                Ok(input)
            }
        }
    }

    /// Effective level; verbose commands are raised to at least `info`
    pub fn effective_level(&self, verbose: bool) -> LevelFilter {
        if verbose && self.log_level < LevelFilter::Info {
            LevelFilter::Info
        } else {
            self.log_level
        }
    }
}

/// Install the stderr logger. Later calls are no-ops.
pub fn init_logging(settings: &Settings, verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(settings.effective_level(verbose))
        .target(env_logger::Target::Stderr);

    if let Ok(filters) = std::env::var(LOG_ENV_VAR) {
        builder.parse_filters(&filters);
    }

    if builder.try_init().is_err() {
        log::debug!("Logger already initialised");
    }
}
