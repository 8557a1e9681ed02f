//! File system operations module
//!
//! This module handles file system work including:
//! - Directory safety classification
//! - Filename pattern matching
//! - Directory scanning (flat and recursive)
//! - Batch move, copy and delete
//! - Folder creation

pub mod folder_operations;
mod operations;
pub mod patterns;
pub mod safety;
pub mod scanner;

pub use folder_operations::create_folder;
pub use operations::{copy_files, delete_files, format_size, move_files};
pub use patterns::{matches_glob_pattern, matches_pattern, PatternMatcher};
pub use safety::{expand_path, is_safe_directory, is_system_directory, requires_confirmation};
pub use scanner::{scan_directory, scan_directory_recursive};
