//! Folder creation
//!
//! Creates the destination directory tree. The safety check applies to the
//! parent, since the folder itself may not exist yet.

use log::{log, warn};
use std::fs;
use std::path::Path;

use crate::error::{DirectoryRole, OperationError};
use crate::files::safety::{expand_path, is_safe_directory};
use crate::types::{Command, OperationResult};

/// Create `destination`, including any missing parents
pub fn create_folder(cmd: &Command) -> OperationResult {
    let mut result = OperationResult::begin(cmd.action.as_str());
    let folder = expand_path(&cmd.destination);
    let parent = folder.parent().unwrap_or(Path::new("/"));

    if !is_safe_directory(parent) {
        warn!("Refusing to create {:?}: parent {:?} is protected", folder, parent);
        return result.abort(OperationError::UnsafeDirectory(DirectoryRole::Parent).to_string());
    }

    if cmd.dry_run {
        return result.complete(format!("Would create folder: {}", folder.display()));
    }

    log!(cmd.narration_level(), "Creating folder: {:?}", folder);

    if let Err(e) = fs::create_dir_all(&folder).map_err(OperationError::from) {
        return result.abort(format!("{} operation failed: {}", cmd.action.title(), e));
    }

    result.files_affected = 1;
    result.complete(format!("Successfully created folder: {}", folder.display()))
}
