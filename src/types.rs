//! Shared types and data structures for smartfile

use chrono::{DateTime, Utc};
use log::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::{DecodeError, FileOpError};

// ============================================================================
// Command Types
// ============================================================================

/// The four supported bulk operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Move,
    Copy,
    Delete,
    CreateFolder,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Move,
        Action::Copy,
        Action::Delete,
        Action::CreateFolder,
    ];

    /// Wire name of the action
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Move => "move",
            Action::Copy => "copy",
            Action::Delete => "delete",
            Action::CreateFolder => "create_folder",
        }
    }

    /// Capitalised name used in failure messages
    pub fn title(self) -> &'static str {
        match self {
            Action::Move => "Move",
            Action::Copy => "Copy",
            Action::Delete => "Delete",
            Action::CreateFolder => "Create folder",
        }
    }

    /// Whether the action reads files out of `source`
    pub fn needs_source(self) -> bool {
        match self {
            Action::Move | Action::Copy | Action::Delete => true,
            Action::CreateFolder => false,
        }
    }

    /// Whether the action writes into `destination`
    pub fn needs_destination(self) -> bool {
        match self {
            Action::Move | Action::Copy | Action::CreateFolder => true,
            Action::Delete => false,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownAction(s.to_string()))
    }
}

/// A decoded operation request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub action: Action,
    /// Filename filter; empty matches everything
    pub pattern: String,
    pub source: String,
    pub destination: String,
    pub dry_run: bool,
    /// Skip confirmation warnings
    pub force: bool,
    pub recursive: bool,
    /// Narrate each file to the diagnostic stream
    pub verbose: bool,
}

impl Command {
    /// Build a command with every optional field left at its default
    pub fn new(action: Action) -> Self {
        Self {
            action,
            pattern: String::new(),
            source: String::new(),
            destination: String::new(),
            dry_run: false,
            force: false,
            recursive: false,
            verbose: false,
        }
    }

    /// Level at which per-file narration is logged
    pub fn narration_level(&self) -> Level {
        if self.verbose {
            Level::Info
        } else {
            Level::Debug
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action)?;
        if !self.pattern.is_empty() {
            write!(f, " files matching '{}'", self.pattern)?;
        }
        if !self.source.is_empty() {
            write!(f, " from '{}'", self.source)?;
        }
        if !self.destination.is_empty() {
            write!(f, " to '{}'", self.destination)?;
        }
        if self.recursive {
            f.write_str(" (recursive)")?;
        }
        if self.dry_run {
            f.write_str(" (dry-run)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Outcome of a single file action inside a batch
pub type FileOutcome = Result<(), FileOpError>;

/// Outcome of one command.
///
/// `success` reports whether the batch ran to completion; individual file
/// failures are listed in `errors` and do not flip it.
#[derive(Debug, Clone, Serialize)]
pub struct OperationResult {
    pub success: bool,
    pub operation: String,
    pub message: String,
    pub files_scanned: usize,
    pub files_matched: usize,
    pub files_affected: usize,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip)]
    started: Instant,
}

impl OperationResult {
    /// Start a result for `operation`, stamping the start time
    pub fn begin(operation: &str) -> Self {
        let now = Utc::now();
        Self {
            success: false,
            operation: operation.to_string(),
            message: String::new(),
            files_scanned: 0,
            files_matched: 0,
            files_affected: 0,
            start_time: now,
            end_time: now,
            duration_ms: 0,
            errors: Vec::new(),
            error_message: None,
            started: Instant::now(),
        }
    }

    /// Result returned for a command that fails validation
    pub fn invalid() -> Self {
        let mut result = Self::begin("");
        result.error_message = Some("Invalid command".to_string());
        result
    }

    /// Mark the whole operation as aborted before or outside the batch
    pub fn abort(mut self, error_message: impl Into<String>) -> Self {
        self.success = false;
        self.error_message = Some(error_message.into());
        self.finish()
    }

    /// Mark the operation as completed with a summary message
    pub fn complete(mut self, message: impl Into<String>) -> Self {
        self.success = true;
        self.message = message.into();
        self.finish()
    }

    /// Record one per-file outcome
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            Ok(()) => self.files_affected += 1,
            Err(e) => self.errors.push(e.to_string()),
        }
    }

    fn finish(mut self) -> Self {
        self.end_time = Utc::now();
        self.duration_ms = self.started.elapsed().as_millis() as u64;
        self
    }
}
