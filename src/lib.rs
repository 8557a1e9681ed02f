//! smartfile - bulk file operations backend
//!
//! This is the library entry point. It reads one JSON command, runs the
//! requested move, copy, delete or create-folder operation, and writes one
//! JSON result.

// Module declarations
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod files;
pub mod types;

// Re-export commonly used types
pub use types::*;

use anyhow::Context;
use log::error;
use std::io::Write;

use config::Settings;

/// Run one request end to end and return the process exit status
pub fn run(settings: &Settings) -> anyhow::Result<u8> {
    let input = settings.read_input()?;
    let decoded = commands::decode_command(&input);

    let verbose = decoded.as_ref().map(|cmd| cmd.verbose).unwrap_or(false);
    config::init_logging(settings, verbose);

    let command = match decoded {
        Ok(command) => command,
        Err(e) => {
            error!("{}", e);
            return Ok(1);
        }
    };

    let result = match commands::process(&command) {
        Ok(result) => result,
        Err(e) => {
            error!("{}", e);
            return Ok(1);
        }
    };

    let output = commands::encode_result(&result, settings.pretty)
        .context("failed to encode result")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output).context("failed to write result")?;

    Ok(commands::exit_status(&result))
}
