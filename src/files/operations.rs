//! Bulk file operations
//!
//! Move, copy and delete share one batch pipeline:
//! - expand and safety-check the directories involved
//! - scan the source and filter by pattern
//! - on dry runs, report counts and stop
//! - otherwise act on each matched file in scan order, recording failures
//!   without aborting the batch

use log::{debug, info, log, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{DirectoryRole, FileOpError, OperationError};
use crate::files::patterns::PatternMatcher;
use crate::files::safety::{expand_path, is_safe_directory};
use crate::files::scanner;
use crate::types::{Action, Command, FileOutcome, OperationResult};

/// The mutation a batch applies, with its resolved destination
#[derive(Debug)]
enum Plan {
    Move { destination: PathBuf },
    Copy { destination: PathBuf },
    Delete,
}

impl Plan {
    fn action(&self) -> Action {
        match self {
            Plan::Move { .. } => Action::Move,
            Plan::Copy { .. } => Action::Copy,
            Plan::Delete => Action::Delete,
        }
    }

    fn destination(&self) -> Option<&Path> {
        match self {
            Plan::Move { destination } | Plan::Copy { destination } => Some(destination),
            Plan::Delete => None,
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            Plan::Move { .. } => "moved",
            Plan::Copy { .. } => "copied",
            Plan::Delete => "deleted",
        }
    }

    fn apply(&self, cmd: &Command, file: &Path) -> FileOutcome {
        match self {
            Plan::Move { destination } => move_one(cmd, file, destination),
            Plan::Copy { destination } => copy_one(cmd, file, destination),
            Plan::Delete => delete_one(cmd, file),
        }
    }
}

/// Format a byte count for humans, e.g. `1.5 KB`
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

fn check_safe(path: &Path, role: DirectoryRole) -> Result<(), OperationError> {
    if is_safe_directory(path) {
        Ok(())
    } else {
        warn!("Refusing to operate on {:?} ({})", path, role);
        Err(OperationError::UnsafeDirectory(role))
    }
}

/// Scan the source and keep the files whose names match the pattern.
/// Scanning skips what it cannot read, so this step cannot fail.
fn select_files(cmd: &Command, source: &Path) -> (usize, Vec<PathBuf>) {
    let files = scanner::scan(source, cmd.recursive);
    let matcher = PatternMatcher::new(&cmd.pattern);
    let files_scanned = files.len();
    let matched: Vec<PathBuf> = files
        .into_iter()
        .filter(|file| {
            file.file_name()
                .map(|name| matcher.matches(&name.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();

    debug!(
        "{} scanned, {} matched pattern {:?} in {:?}",
        files_scanned,
        matched.len(),
        cmd.pattern,
        source
    );
    (files_scanned, matched)
}

fn target_path(file: &Path, dest_dir: &Path) -> io::Result<PathBuf> {
    file.file_name()
        .map(|name| dest_dir.join(name))
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))
}

fn move_one(cmd: &Command, file: &Path, dest_dir: &Path) -> FileOutcome {
    let wrap = |e| FileOpError::new("move", file.to_path_buf(), e);
    let target = target_path(file, dest_dir).map_err(wrap)?;
    log!(cmd.narration_level(), "Moving: {:?} -> {:?}", file, target);
    fs::rename(file, &target).map_err(wrap)
}

fn copy_one(cmd: &Command, file: &Path, dest_dir: &Path) -> FileOutcome {
    let wrap = |e| FileOpError::new("copy", file.to_path_buf(), e);
    let target = target_path(file, dest_dir).map_err(wrap)?;

    // fs::copy onto the source itself would truncate it
    if target.exists() && fs::canonicalize(&target).ok() == fs::canonicalize(file).ok() {
        return Err(wrap(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "source and destination are the same file",
        )));
    }

    let level = cmd.narration_level();
    if log::log_enabled!(level) {
        let size = fs::metadata(file).map(|m| m.len()).unwrap_or(0);
        log!(level, "Copying: {:?} -> {:?} ({})", file, target, format_size(size));
    }
    fs::copy(file, &target).map(|_| ()).map_err(wrap)
}

fn delete_one(cmd: &Command, file: &Path) -> FileOutcome {
    log!(cmd.narration_level(), "Deleting: {:?}", file);
    fs::remove_file(file).map_err(|e| FileOpError::new("delete", file.to_path_buf(), e))
}

/// Run a move, copy or delete batch
fn run_batch(cmd: &Command, plan: Plan) -> OperationResult {
    let action = plan.action();
    let mut result = OperationResult::begin(action.as_str());

    let source = expand_path(&cmd.source);
    let checked = check_safe(&source, DirectoryRole::Source).and_then(|()| {
        plan.destination()
            .map_or(Ok(()), |dest| check_safe(dest, DirectoryRole::Destination))
    });
    if let Err(e) = checked {
        return result.abort(e.to_string());
    }

    let (files_scanned, matched) = select_files(cmd, &source);
    result.files_scanned = files_scanned;
    result.files_matched = matched.len();

    if cmd.dry_run {
        let message = format!("Would {} {} files", action, matched.len());
        info!("{}", message);
        return result.complete(message);
    }

    for file in &matched {
        let outcome = plan.apply(cmd, file);
        if let Err(e) = &outcome {
            warn!("Error: {}", e);
        }
        result.record(outcome);
    }

    let message = format!(
        "Successfully {} {} files",
        plan.past_tense(),
        result.files_affected
    );
    info!("{} ({} failed)", message, result.errors.len());
    result.complete(message)
}

/// Move every matched file from `source` into `destination`
pub fn move_files(cmd: &Command) -> OperationResult {
    let destination = expand_path(&cmd.destination);
    run_batch(cmd, Plan::Move { destination })
}

/// Copy every matched file from `source` into `destination`, overwriting
pub fn copy_files(cmd: &Command) -> OperationResult {
    let destination = expand_path(&cmd.destination);
    run_batch(cmd, Plan::Copy { destination })
}

/// Delete every matched file under `source`. `destination` is ignored.
pub fn delete_files(cmd: &Command) -> OperationResult {
    run_batch(cmd, Plan::Delete)
}
