//! Decoding the external command object
//!
//! The reference encoding is a JSON object:
//! `action` (string, required), `pattern`/`source`/`destination` (strings,
//! default ""), `dry_run`/`force`/`recursive`/`verbose` (booleans, default
//! false). Non-string text fields fall back to "".

use log::debug;
use serde_json::Value;

use crate::error::DecodeError;
use crate::types::{Action, Command};

fn string_field(object: &Value, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn bool_field(object: &Value, key: &'static str) -> Result<bool, DecodeError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => {
            debug!("Field {} has non-boolean value {}", key, other);
            Err(DecodeError::InvalidField(key))
        }
    }
}

/// Decode a command from its JSON text
pub fn decode_command(input: &str) -> Result<Command, DecodeError> {
    let object: Value = serde_json::from_str(input.trim())?;

    let action = object
        .get("action")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingAction)?
        .parse::<Action>()?;

    let command = Command {
        action,
        pattern: string_field(&object, "pattern"),
        source: string_field(&object, "source"),
        destination: string_field(&object, "destination"),
        dry_run: bool_field(&object, "dry_run")?,
        force: bool_field(&object, "force")?,
        recursive: bool_field(&object, "recursive")?,
        verbose: bool_field(&object, "verbose")?,
    };

    debug!("Decoded command: {:?}", command);
    Ok(command)
}
