//! Application layer errors.
//!
//! These represent failures while running the pipeline against the outside
//! world. Request validation failures are `DomainError` from `crate::domain`.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::PlatformVariant;
use crate::error::ErrorCategory;

/// Errors raised by pipeline stages and the adapters behind them.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The template snapshot could not be fetched.
    #[error("Failed to fetch template from {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The environment file could not be rendered or written.
    #[error("Failed to write {path}: {reason}")]
    Substitution { path: PathBuf, reason: String },

    /// The snapshot lacks the build helper for the host platform.
    #[error("Template has no {variant} build file (expected {path})")]
    MissingVariant {
        variant: PlatformVariant,
        path: PathBuf,
    },

    /// The manifest (or a source file referencing it) could not be rewritten.
    #[error("Failed to rewrite {path}: {reason}")]
    Manifest { path: PathBuf, reason: String },

    /// A toolchain command could not be started or exited unsuccessfully.
    #[error("`{command}` failed ({}): {stderr}", status_text(.status))]
    DependencyResolution {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// Generic filesystem operation failure reported by an adapter.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// Target directory already exists and overwriting was not requested.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// A materialized directory could not be removed.
    #[error("Cleanup failed for {path}: {reason}")]
    Cleanup { path: PathBuf, reason: String },
}

fn status_text(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {code}"),
        None => "not started or killed by signal".to_string(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Fetch { url, .. } => vec![
                format!("Check that {url} is reachable and you have access to it"),
                "Use --template to point at another repository or a local directory".into(),
            ],
            Self::Substitution { path, .. } | Self::Manifest { path, .. } => vec![
                format!("Check that {} is writable", path.display()),
                "The template may be incomplete; try fetching it again".into(),
            ],
            Self::MissingVariant { path, .. } => vec![
                format!("The template snapshot should contain {}", path.display()),
                "Use --template to point at a template with platform build files".into(),
            ],
            Self::DependencyResolution { command, .. } => vec![
                "Make sure the Go toolchain is installed and on PATH".into(),
                format!("Run `{command}` inside the project directory to retry"),
                "Or pass --skip-deps to leave dependency resolution for later".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different project name".into(),
            ],
            Self::Cleanup { path, .. } => vec![
                format!("Remove {} manually", path.display()),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch { .. } | Self::DependencyResolution { .. } => ErrorCategory::External,
            Self::MissingVariant { .. } => ErrorCategory::NotFound,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::Substitution { .. }
            | Self::Manifest { .. }
            | Self::Filesystem { .. }
            | Self::Cleanup { .. } => ErrorCategory::Internal,
        }
    }
}
