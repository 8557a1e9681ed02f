//! Directory safety policy
//!
//! Classifies directories as safe or unsafe to operate on. Filesystem roots
//! and well-known system directories are refused.

use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::types::Action;

/// Filesystem roots that are never operated on
pub const ROOT_DIRECTORIES: &[&str] = &["/", "C:\\", "D:\\"];

/// Deny-listed prefixes. Matching is a plain string prefix test, so
/// `/usrlocal` is refused along with `/usr`.
pub const SYSTEM_DIRECTORIES: &[&str] = &[
    "/bin",
    "/sbin",
    "/usr",
    "/etc",
    "/var",
    "/lib",
    "/opt",
    "C:\\Windows",
    "C:\\Program Files",
    "C:\\Program Files (x86)",
];

/// Entry count above which a non-delete operation asks for confirmation
pub const CONFIRMATION_THRESHOLD: usize = 100;

/// Expand a leading `~/` to the current user's home directory.
///
/// Anything else, relative paths included, is returned unchanged.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
        debug!("No home directory available to expand {:?}", path);
    }
    PathBuf::from(path)
}

/// Check whether a path is a known system directory (or below one)
pub fn is_system_directory(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    SYSTEM_DIRECTORIES
        .iter()
        .any(|sys_dir| path_str.starts_with(sys_dir))
}

/// Check whether a directory may be operated on
pub fn is_safe_directory(path: &Path) -> bool {
    if ROOT_DIRECTORIES.iter().any(|root| path == Path::new(root)) {
        return false;
    }
    !is_system_directory(path)
}

/// Whether an action on `path` would warrant a confirmation prompt.
///
/// Deletes always do; other actions do when the tree holds more than
/// [`CONFIRMATION_THRESHOLD`] entries. Unreadable trees never do.
pub fn requires_confirmation(action: Action, path: &Path) -> bool {
    if action == Action::Delete {
        return true;
    }

    let mut entries = WalkDir::new(path).min_depth(1).into_iter();
    let mut count = 0;
    while let Some(Ok(_)) = entries.next() {
        count += 1;
        if count > CONFIRMATION_THRESHOLD {
            return true;
        }
    }
    false
}
