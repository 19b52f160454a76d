//! `socle clean`: remove a project directory, typically one left behind by
//! a failed `socle new`.

use tracing::instrument;

use socle_core::domain::{MaterializedDirectory, ProjectIdentity};

use crate::{
    cli::CleanArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: CleanArgs, output: OutputManager) -> CliResult<()> {
    let identity =
        ProjectIdentity::normalize(&args.name).map_err(|e| CliError::Core(e.into()))?;
    let workdir = std::env::current_dir().map_err(|e| CliError::IoError {
        message: "failed to read the current directory".into(),
        source: e,
    })?;
    let dir = MaterializedDirectory::new(workdir.join(identity.directory_name()));

    if super::build_service().discard(&dir, args.force)? {
        output.success(&format!("Removed {}", dir.root().display()))?;
    } else {
        output.info(&format!("Nothing to remove at {}", dir.root().display()))?;
    }
    Ok(())
}
