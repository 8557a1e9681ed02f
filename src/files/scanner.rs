//! Directory scanning
//!
//! Lists the regular files under a directory. Missing or non-directory roots
//! yield nothing, and unreadable subtrees are skipped so a scan always
//! returns whatever it could reach.

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List the regular files directly inside `dir`
pub fn scan_directory(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        debug!("scan_directory: {:?} is not a directory", dir);
        return Vec::new();
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read directory {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    debug!("Scanned {:?}: {} files", dir, files.len());
    files
}

/// List the regular files anywhere below `dir`.
///
/// Directory symlinks are not followed.
pub fn scan_directory_recursive(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        debug!("scan_directory_recursive: {:?} is not a directory", dir);
        return Vec::new();
    }

    let mut files = Vec::new();
    let mut skipped = 0;

    for entry in WalkDir::new(dir).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                skipped += 1;
                debug!("Skipping unreadable entry under {:?}: {}", dir, e);
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() || (entry.path_is_symlink() && path.is_file()) {
            files.push(path.to_path_buf());
        }
    }

    debug!(
        "Scanned {:?} recursively: {} files ({} entries skipped)",
        dir,
        files.len(),
        skipped
    );
    files
}

/// Scan `dir`, descending into subdirectories when `recursive` is set
pub fn scan(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    if recursive {
        scan_directory_recursive(dir)
    } else {
        scan_directory(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn names(paths: &[PathBuf]) -> HashSet<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("test1.txt"), "1").unwrap();
        fs::write(dir.path().join("test2.jpg"), "2").unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/test3.png"), "3").unwrap();
        fs::write(dir.path().join("sub/deeper/test4.txt"), "4").unwrap();
        dir
    }

    // ========== scan_directory tests ==========

    #[test]
    fn test_scan_lists_only_top_level_files() {
        let dir = fixture();
        let files = scan_directory(dir.path());
        assert_eq!(files.len(), 2);
        assert_eq!(
            names(&files),
            ["test1.txt", "test2.jpg"].iter().map(|s| s.to_string()).collect()
        );
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        assert!(scan_directory(Path::new("/nonexistent/smartfile/scan")).is_empty());
    }

    #[test]
    fn test_scan_file_instead_of_directory_is_empty() {
        let dir = fixture();
        assert!(scan_directory(&dir.path().join("test1.txt")).is_empty());
        assert!(scan_directory_recursive(&dir.path().join("test1.txt")).is_empty());
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(scan_directory(dir.path()).is_empty());
        assert!(scan_directory_recursive(dir.path()).is_empty());
    }

    // ========== scan_directory_recursive tests ==========

    #[test]
    fn test_recursive_scan_descends() {
        let dir = fixture();
        let files = scan_directory_recursive(dir.path());
        assert_eq!(files.len(), 4);
        assert!(names(&files).contains("test4.txt"));
        assert!(files.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_scan_switches_on_flag() {
        let dir = fixture();
        assert_eq!(scan(dir.path(), false).len(), 2);
        assert_eq!(scan(dir.path(), true).len(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_to_directories_are_not_files() {
        let dir = fixture();
        std::os::unix::fs::symlink(dir.path().join("sub"), dir.path().join("link_to_sub")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("broken")).unwrap();

        let top = scan_directory(dir.path());
        assert_eq!(top.len(), 2);

        // The linked directory is not walked a second time
        let all = scan_directory_recursive(dir.path());
        assert_eq!(all.len(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_file_counts_as_file() {
        let dir = fixture();
        std::os::unix::fs::symlink(dir.path().join("test1.txt"), dir.path().join("alias.txt")).unwrap();
        assert_eq!(scan_directory(dir.path()).len(), 3);
        assert_eq!(scan_directory_recursive(dir.path()).len(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("top.txt"), "t").unwrap();
        fs::create_dir_all(dir.path().join("locked")).unwrap();
        fs::write(dir.path().join("locked/hidden.txt"), "h").unwrap();
        fs::create_dir_all(dir.path().join("open")).unwrap();
        fs::write(dir.path().join("open/seen.txt"), "s").unwrap();

        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let files = scan_directory_recursive(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(
            names(&files),
            ["top.txt", "seen.txt"].iter().map(|s| s.to_string()).collect()
        );
    }
}
