use clap::Parser;
use std::process::ExitCode;

use smartfile_lib::config::Settings;

fn main() -> ExitCode {
    let settings = Settings::parse();
    match smartfile_lib::run(&settings) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
