//! Unified error handling for Socle Core.
//!
//! Wraps domain and application errors behind one type that carries
//! user-actionable suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Socle Core operations.
#[derive(Debug, Error, Clone)]
pub enum SocleError {
    /// The request itself is unusable.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// A pipeline step could not complete.
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SocleError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Check the SOCLE_* environment variables and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Socle".into(),
                "Re-run with -vvv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The low-level reason carried by filesystem-flavored errors.
    ///
    /// Adapters report I/O failures as `ApplicationError::Filesystem`; the
    /// service re-labels them per stage and keeps this text.
    pub fn reason(&self) -> String {
        match self {
            Self::Application(
                ApplicationError::Filesystem { reason, .. }
                | ApplicationError::Substitution { reason, .. }
                | ApplicationError::Manifest { reason, .. }
                | ApplicationError::Fetch { reason, .. }
                | ApplicationError::Cleanup { reason, .. },
            ) => reason.clone(),
            other => other.to_string(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    /// A network service or external toolchain misbehaved.
    External,
    Internal,
}

/// Convenient result type alias.
pub type SocleResult<T> = Result<T, SocleError>;
