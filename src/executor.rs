//! Command validation and dispatch

use log::{info, log, warn};

use crate::files::{self, expand_path, requires_confirmation};
use crate::types::{Action, Command, OperationResult};

/// Check that a command carries every field its action requires
pub fn validate(cmd: &Command) -> bool {
    let has_source = !cmd.source.is_empty();
    let has_destination = !cmd.destination.is_empty();

    match cmd.action {
        Action::Move | Action::Copy => has_source && has_destination,
        Action::Delete => has_source,
        Action::CreateFolder => has_destination,
    }
}

/// Validate and run a command, producing exactly one result
pub fn execute(cmd: &Command) -> OperationResult {
    let level = cmd.narration_level();
    log!(level, "Executing command: {}", cmd);

    if !validate(cmd) {
        warn!("Rejected invalid command: {}", cmd);
        return OperationResult::invalid();
    }

    warn_if_unconfirmed(cmd);

    let result = match cmd.action {
        Action::Move => files::move_files(cmd),
        Action::Copy => files::copy_files(cmd),
        Action::Delete => files::delete_files(cmd),
        Action::CreateFolder => files::create_folder(cmd),
    };

    log!(
        level,
        "Operation completed: {}",
        if result.success { "SUCCESS" } else { "FAILED" }
    );
    if let Some(error) = &result.error_message {
        log!(level, "Error: {}", error);
    }
    result
}

/// There is no prompt at this layer; unforced risky commands are logged
fn warn_if_unconfirmed(cmd: &Command) {
    if cmd.force || cmd.dry_run {
        return;
    }

    let target = if cmd.action.needs_source() {
        &cmd.source
    } else {
        &cmd.destination
    };

    if requires_confirmation(cmd.action, &expand_path(target)) {
        warn!("Proceeding without confirmation: {} (set force to silence)", cmd);
    } else {
        info!("No confirmation needed for {}", cmd.action);
    }
}
