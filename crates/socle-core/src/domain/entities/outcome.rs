//! Pipeline stages, run state and the final outcome.

use std::fmt;

use thiserror::Error;

use crate::error::SocleError;

/// A step of the materialization pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Normalizing,
    Fetching,
    Substituting,
    ResolvingArtifact,
    RewritingManifest,
    TriggeringResolution,
}

impl Stage {
    pub const ALL: [Self; 6] = [
        Self::Normalizing,
        Self::Fetching,
        Self::Substituting,
        Self::ResolvingArtifact,
        Self::RewritingManifest,
        Self::TriggeringResolution,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normalizing => "normalizing",
            Self::Fetching => "fetching",
            Self::Substituting => "substituting",
            Self::ResolvingArtifact => "resolving-artifact",
            Self::RewritingManifest => "rewriting-manifest",
            Self::TriggeringResolution => "triggering-resolution",
        }
    }

    /// Progress line shown while the stage runs.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Normalizing => "Normalizing project name",
            Self::Fetching => "Cloning template repository",
            Self::Substituting => "Writing environment file",
            Self::ResolvingArtifact => "Selecting platform Makefile",
            Self::RewritingManifest => "Rewriting module manifest",
            Self::TriggeringResolution => "Resolving dependencies",
        }
    }

    /// 1-based position in the pipeline.
    pub fn ordinal(&self) -> usize {
        Self::ALL
            .iter()
            .position(|stage| stage == self)
            .map_or(0, |index| index + 1)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running(Stage),
    Done,
    Failed(Stage),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Running(stage) => write!(f, "{stage}"),
            Self::Done => f.write_str("done"),
            Self::Failed(stage) => write!(f, "failed at {stage}"),
        }
    }
}

/// The stage a run stopped at and why.
#[derive(Debug, Error, Clone)]
#[error("{stage} failed: {cause}")]
pub struct PipelineFailure {
    pub stage: Stage,
    #[source]
    pub cause: SocleError,
}

impl PipelineFailure {
    pub fn new(stage: Stage, cause: impl Into<SocleError>) -> Self {
        Self {
            stage,
            cause: cause.into(),
        }
    }
}

/// Result of one materialization run.
#[derive(Debug, Clone)]
pub enum Outcome {
    Success { directory_name: String },
    Failure(PipelineFailure),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn failure(&self) -> Option<&PipelineFailure> {
        match self {
            Self::Failure(failure) => Some(failure),
            Self::Success { .. } => None,
        }
    }

    /// Convert into a `Result`, yielding the directory name on success.
    pub fn into_result(self) -> Result<String, PipelineFailure> {
        match self {
            Self::Success { directory_name } => Ok(directory_name),
            Self::Failure(failure) => Err(failure),
        }
    }
}
