//! Toolchain adapter backed by `std::process`.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use socle_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, Toolchain},
    },
    domain::ToolchainCommand,
    error::SocleResult,
};

/// Runs toolchain commands as child processes and waits for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessToolchain;

impl ProcessToolchain {
    pub fn new() -> Self {
        Self
    }
}

impl Toolchain for ProcessToolchain {
    fn run(&self, command: &ToolchainCommand, cwd: &Path) -> SocleResult<CommandOutput> {
        debug!(%command, cwd = %cwd.display(), "Spawning");

        let output = Command::new(command.program())
            .args(command.args())
            .current_dir(cwd)
            .output()
            .map_err(|e| ApplicationError::DependencyResolution {
                command: command.to_string(),
                status: None,
                stderr: format!("failed to start {}: {e}", command.program()),
            })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
