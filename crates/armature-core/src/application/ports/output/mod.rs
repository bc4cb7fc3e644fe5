//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the engine needs from external systems. The
//! `armature-adapters` crate provides the production and in-memory
//! implementations; the CLI supplies the interactive conflict prompt.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

#[cfg(test)]
use mockall::automock;

use crate::application::blueprint::Blueprint;
use crate::domain::{ConflictDecision, ConflictEntry};
use crate::error::ArmatureResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `armature_adapters::filesystem::LocalFilesystem` (production)
/// - `armature_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Both the conflicter and storage go through this port, which keeps every
/// core pipeline testable without touching a disk.
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a file's content.
    fn read_file(&self, path: &Path) -> ArmatureResult<String>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> ArmatureResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ArmatureResult<()>;
}

/// Port for resolving a declared hook into the blueprint it delegates to.
///
/// The lookup key composition (how a hook name and the value bound to its
/// option become a registry key) is owned by the implementation, not by the
/// engine.
#[cfg_attr(test, automock)]
pub trait Resolver: Send + Sync {
    fn resolve(&self, hook: &str, context: &Value) -> ArmatureResult<Arc<Blueprint>>;
}

/// Port for the interactive confirmation on diverging writes.
///
/// `existing` is the current on-disk content of the entry's target. A
/// diff-then-decide flow lives entirely inside the implementation; the
/// engine only sees the final decision.
pub trait ConflictPrompt: Send + Sync {
    fn confirm(&self, entry: &ConflictEntry, existing: &str) -> ArmatureResult<ConflictDecision>;
}

/// Port for locating the destination root.
///
/// Returns the nearest ancestor of `start` containing the project marker
/// file, or `start` itself if none is found.
pub trait RootLocator: Send + Sync {
    fn locate(&self, start: &Path) -> PathBuf;
}

/// Port for project-level named configuration, consulted by `default_for`
/// after the instantiation options bag.
#[cfg_attr(test, automock)]
pub trait ProjectDefaults: Send + Sync {
    fn lookup(&self, name: &str) -> Option<Value>;
}
