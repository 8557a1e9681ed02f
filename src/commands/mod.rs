//! Process boundary
//!
//! Turns the external JSON request into a [`Command`] and the
//! [`OperationResult`] back into JSON. Invalid requests are rejected here,
//! before anything touches the filesystem, and produce no result object.

mod request;
mod response;

pub use request::decode_command;
pub use response::{encode_result, exit_status};

use log::warn;

use crate::error::DecodeError;
use crate::executor;
use crate::types::{Command, OperationResult};

/// Validate and execute a decoded command
pub fn process(command: &Command) -> Result<OperationResult, DecodeError> {
    if !executor::validate(command) {
        warn!("Invalid command: {}", command);
        return Err(DecodeError::Invalid);
    }
    Ok(executor::execute(command))
}
