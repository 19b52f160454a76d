//! Driven (output) ports, implemented by infrastructure.
//!
//! These traits define what the pipeline needs from external systems.
//! The `socle-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{Stage, TemplateSource, ToolchainCommand};
use crate::error::SocleResult;

/// Port for obtaining a template snapshot.
///
/// Implemented by:
/// - `socle_adapters::fetcher::GitFetcher` (shallow clone)
/// - `socle_adapters::fetcher::DirectoryFetcher` (local template directory)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateFetcher: Send + Sync {
    /// Populate `destination` with the snapshot at the tip of the source's
    /// default branch. `destination` must not exist yet.
    ///
    /// Version-control metadata left in the tree is stripped by the caller.
    fn fetch(&self, source: &TemplateSource, destination: &Path) -> SocleResult<()>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `socle_adapters::filesystem::LocalFilesystem` (production)
/// - `socle_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> SocleResult<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> SocleResult<()>;

    /// Copy a file's bytes to `to`, replacing it if present.
    fn copy_file(&self, from: &Path, to: &Path) -> SocleResult<()>;

    fn remove_file(&self, path: &Path) -> SocleResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SocleResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Every regular file under `root` whose extension is `extension`.
    fn find_files(&self, root: &Path, extension: &str) -> SocleResult<Vec<PathBuf>>;
}

/// Port for the application secret.
#[cfg_attr(test, mockall::automock)]
pub trait SecretGenerator: Send + Sync {
    /// A fresh, unpredictable secret of `length` symbols.
    fn generate(&self, length: usize) -> String;
}

/// What a finished toolchain command reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Port for running the language toolchain.
#[cfg_attr(test, mockall::automock)]
pub trait Toolchain: Send + Sync {
    /// Run `command` to completion in `cwd`.
    ///
    /// A command that starts and exits non-zero is *not* an error here; only
    /// a failure to spawn it is.
    fn run(&self, command: &ToolchainCommand, cwd: &Path) -> SocleResult<CommandOutput>;
}

/// Port for the templates bundled with the installer.
#[cfg_attr(test, mockall::automock)]
pub trait AssetSource: Send + Sync {
    /// Environment file template (uses `${APP_NAME}` and `${KEY}`).
    fn env_template(&self) -> SocleResult<String>;

    /// Manifest template (uses `${APP_NAME}`).
    fn manifest_template(&self) -> SocleResult<String>;
}

/// Receives stage transitions as a run progresses.
pub trait PipelineObserver: Send + Sync {
    fn stage_started(&self, _stage: Stage) {}

    fn stage_finished(&self, _stage: Stage) {}

    fn stage_failed(&self, _stage: Stage, _reason: &str) {}

    fn stage_skipped(&self, _stage: Stage) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}
