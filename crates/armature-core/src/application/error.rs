//! Application layer errors.
//!
//! These errors represent failures in orchestration and port interaction, not
//! business logic. Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while the engine talks to its collaborators.
#[derive(Debug, Error, Clone)]
pub enum EngineError {
    /// The resolver could not produce a blueprint for a hook.
    #[error("hook resolution failed for '{hook}': {reason}")]
    Resolution { hook: String, reason: String },

    /// Filesystem operation failed.
    #[error("filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// The conflict prompt could not deliver a decision.
    #[error("conflict prompt failed: {reason}")]
    Prompt { reason: String },

    /// The storage record could not be persisted.
    #[error("storage error at {path}: {reason}")]
    Storage { path: PathBuf, reason: String },

    /// A hook's sub-generator emitted an error during its pipeline.
    #[error("hook '{hook}' failed: {cause}")]
    HookFailed { hook: String, cause: String },
}

impl EngineError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Resolution { hook, reason } => vec![
                format!("No generator found for hook '{}': {}", hook, reason),
                "Try: armature list to see registered generators".into(),
                "Check the value supplied for the hook's option".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the destination root exists".into(),
            ],
            Self::Prompt { .. } => vec![
                "The conflict prompt could not run".into(),
                "Re-run with --force or --skip-all for a non-interactive resolution".into(),
            ],
            Self::Storage { path, .. } => vec![
                format!("Could not persist: {}", path.display()),
                "Check that the destination root is writable".into(),
            ],
            Self::HookFailed { hook, .. } => vec![
                format!("The '{}' sub-generator did not finish cleanly", hook),
                "Re-run with -v for the sub-generator's own log output".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Resolution { .. } => ErrorCategory::NotFound,
            Self::Filesystem { .. } | Self::Storage { .. } => ErrorCategory::Internal,
            Self::Prompt { .. } => ErrorCategory::Internal,
            Self::HookFailed { .. } => ErrorCategory::Internal,
        }
    }
}
