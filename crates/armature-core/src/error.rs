//! Unified error handling for Armature Core.
//!
//! This module provides a unified error type that wraps domain and engine
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::EngineError;
use crate::domain::DomainError;

/// Root error type for Armature Core operations.
///
/// This enum wraps all possible errors that can occur when using
/// armature-core, providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum ArmatureError {
    /// Errors from the domain layer (contract violations on declarations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (port and orchestration failures).
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ArmatureError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Engine(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Armature".into(),
                "Please report this issue at: https://github.com/cosecruz/armature/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Engine(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ArmatureResult<T> = Result<T, ArmatureError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> ArmatureResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> ArmatureResult<T> {
        self.map_err(|e| ArmatureError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
