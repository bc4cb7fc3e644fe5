//! Conflict vocabulary: a pending write intent and the decision taken on it.

use std::path::PathBuf;

/// One file-write intent queued by a step, awaiting resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictEntry {
    pub path: PathBuf,
    pub content: String,
}

impl ConflictEntry {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// The outcome chosen for a diverging write.
///
/// A `Skip` is a normal decision, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    Write,
    Skip,
}

/// Counts from one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Files written (new targets and confirmed overwrites).
    pub written: usize,
    /// Diverging targets the user chose to keep.
    pub skipped: usize,
    /// Targets whose existing content already matched.
    pub identical: usize,
}

impl ResolutionReport {
    pub fn total(&self) -> usize {
        self.written + self.skipped + self.identical
    }
}
