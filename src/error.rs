//! Error types
//!
//! Three layers, matching how far an operation got:
//! - [`DecodeError`]: the request never became a [`Command`](crate::types::Command)
//! - [`OperationError`]: the command aborted before or outside its batch
//! - [`FileOpError`]: one file in a batch failed; the batch carries on

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning an external request into a command
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed command: {0}")]
    Json(#[from] serde_json::Error),

    #[error("action field is missing or not a string")]
    MissingAction,

    #[error("unknown action: '{0}'")]
    UnknownAction(String),

    #[error("field '{0}' must be a boolean")]
    InvalidField(&'static str),

    #[error("invalid command")]
    Invalid,
}

/// Which side of an operation a directory belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryRole {
    Source,
    Destination,
    Parent,
}

impl DirectoryRole {
    fn label(self) -> &'static str {
        match self {
            DirectoryRole::Source => "Source",
            DirectoryRole::Destination => "Destination",
            DirectoryRole::Parent => "Parent",
        }
    }
}

impl std::fmt::Display for DirectoryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fatal errors that abort a whole operation
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("{0} directory is not safe to operate on")]
    UnsafeDirectory(DirectoryRole),

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// A single file that could not be processed
#[derive(Debug, Error)]
#[error("Failed to {verb} {}: {source}", .path.display())]
pub struct FileOpError {
    verb: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl FileOpError {
    pub fn new(verb: &'static str, path: PathBuf, source: io::Error) -> Self {
        Self { verb, path, source }
    }
}
