//! Template fetch from a local directory.

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use socle_core::{
    application::{ApplicationError, ports::TemplateFetcher},
    domain::TemplateSource,
    error::{SocleError, SocleResult},
};

/// Copies a template tree that already exists on disk.
///
/// The copy is complete; depth has no meaning for a plain directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryFetcher;

impl DirectoryFetcher {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateFetcher for DirectoryFetcher {
    fn fetch(&self, source: &TemplateSource, destination: &Path) -> SocleResult<()> {
        let root = Path::new(source.url());
        let fetch_error = |reason: String| -> SocleError {
            ApplicationError::Fetch {
                url: source.url().to_string(),
                reason,
            }
            .into()
        };

        if !root.is_dir() {
            return Err(fetch_error(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        if destination.exists() {
            return Err(fetch_error(format!(
                "destination {} already exists",
                destination.display()
            )));
        }

        info!(from = %root.display(), to = %destination.display(), "Copying template");

        let mut copied = 0usize;
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.map_err(|e| fetch_error(e.to_string()))?;
            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| fetch_error(e.to_string()))?;
            let target = destination.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)
                    .map_err(|e| fetch_error(format!("{}: {e}", target.display())))?;
            } else {
                fs::copy(entry.path(), &target)
                    .map_err(|e| fetch_error(format!("{}: {e}", entry.path().display())))?;
                copied += 1;
            }
        }

        debug!(files = copied, "Template copied");
        Ok(())
    }
}
