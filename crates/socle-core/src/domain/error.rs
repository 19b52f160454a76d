// ============================================================================
// domain/error.rs - REQUEST VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `Outcome::Failure`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The project request violates a caller precondition (empty name, a
    /// name that resolves to no usable directory, ...).
    #[error("Invalid project request: {0}")]
    InvalidRequest(String),

    /// A textual option value did not match any known variant.
    #[error("Unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownOption {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidRequest(msg) => vec![
                format!("Details: {msg}"),
                "Pass a project name such as 'myapp' or 'github.com/org/myapp'".into(),
            ],
            Self::UnknownOption { kind, expected, .. } => vec![
                format!("Supported {kind} values: {expected}"),
                "Run 'socle new --help' to see every option".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}
