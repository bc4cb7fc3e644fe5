use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can travel through the event stream)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("required argument '{name}' was not provided")]
    MissingArgument { name: String },

    #[error("step name '{name}' is reserved: names starting with '_' are internal")]
    ReservedStepName { name: String },

    #[error("duplicate step '{name}' in the same blueprint")]
    DuplicateStep { name: String },

    #[error("invalid blueprint: {0}")]
    InvalidBlueprint(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingArgument { name } => vec![
                format!("Pass a value for '{}' on the command line", name),
                "Run with --help to see the expected arguments".into(),
            ],
            Self::ReservedStepName { name } => vec![
                format!("Rename the step '{}' so it does not start with '_'", name),
            ],
            Self::DuplicateStep { name } => vec![
                format!("Each step in a blueprint needs a unique name; '{}' appears twice", name),
                "Use inherit() to override a parent step instead of redeclaring it".into(),
            ],
            Self::InvalidBlueprint(msg) => vec![
                "Check the blueprint declaration".into(),
                format!("Details: {}", msg),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingArgument { .. } => ErrorCategory::Validation,
            Self::ReservedStepName { .. } | Self::DuplicateStep { .. } => ErrorCategory::Validation,
            Self::InvalidBlueprint(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
