//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use socle_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SocleError, SocleResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> SocleResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SocleResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> SocleResult<()> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, "copy file"))
    }

    fn remove_file(&self, path: &Path) -> SocleResult<()> {
        fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir_all(&self, path: &Path) -> SocleResult<()> {
        fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn find_files(&self, root: &Path, extension: &str) -> SocleResult<Vec<PathBuf>> {
        let mut found = Vec::new();
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                ApplicationError::Filesystem {
                    path,
                    reason: format!("Failed to walk directory: {e}"),
                }
            })?;

            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == extension)
            {
                found.push(entry.into_path());
            }
        }
        Ok(found)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SocleError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copy_then_remove_leaves_only_the_copy() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("Makefile.mac");
        let to = tmp.path().join("Makefile");
        fs::write(&from, "build:\n\tgo build\n").unwrap();

        let local = LocalFilesystem::new();
        local.copy_file(&from, &to).unwrap();
        local.remove_file(&from).unwrap();

        assert!(!local.exists(&from));
        assert_eq!(local.read_to_string(&to).unwrap(), "build:\n\tgo build\n");
    }

    #[test]
    fn find_files_matches_extension_recursively() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("internal/app")).unwrap();
        fs::write(tmp.path().join("main.go"), "").unwrap();
        fs::write(tmp.path().join("internal/app/app.go"), "").unwrap();
        fs::write(tmp.path().join("README.md"), "").unwrap();
        fs::write(tmp.path().join("internal/notes.gone"), "").unwrap();

        let mut found = LocalFilesystem.find_files(tmp.path(), "go").unwrap();
        found.sort();

        assert_eq!(
            found,
            [
                tmp.path().join("internal/app/app.go"),
                tmp.path().join("main.go"),
            ]
        );
    }

    #[test]
    fn io_errors_carry_the_path() {
        let missing = Path::new("/definitely/not/here.txt");
        let err = LocalFilesystem.read_to_string(missing).unwrap_err();
        match err {
            SocleError::Application(ApplicationError::Filesystem { path, reason }) => {
                assert_eq!(path, missing);
                assert!(reason.starts_with("Failed to read file"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
