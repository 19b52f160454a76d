//! Project name normalization.

use std::fmt;

use crate::domain::DomainError;

/// Segment separator of a module path.
const SEPARATOR: char = '/';

/// Names derived from the raw project name.
///
/// Invariant: `directory_name` never contains a path separator and is never
/// `.` or `..`. `module_identity` keeps the full (lower-cased) input so that
/// `github.com/org/app` survives as the manifest's module path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectIdentity {
    directory_name: String,
    module_identity: String,
}

impl ProjectIdentity {
    /// Normalize a raw, possibly URL-like, project name.
    ///
    /// ```
    /// use socle_core::domain::ProjectIdentity;
    ///
    /// let id = ProjectIdentity::normalize("Org/MyApp").unwrap();
    /// assert_eq!(id.directory_name(), "myapp");
    /// assert_eq!(id.module_identity(), "org/myapp");
    /// ```
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidRequest` when the input is blank, contains a
    /// backslash, or its final segment is empty, `.` or `..`.
    pub fn normalize(raw_name: &str) -> Result<Self, DomainError> {
        if raw_name.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "project name cannot be empty".into(),
            ));
        }

        // Module paths only know '/', and a '\\' would end up in the manifest.
        if raw_name.contains('\\') {
            return Err(DomainError::InvalidRequest(format!(
                "'{raw_name}' contains '\\'; separate segments with '/'"
            )));
        }

        let module_identity = raw_name.to_lowercase();
        let directory_name = module_identity
            .rsplit(SEPARATOR)
            .next()
            .unwrap_or_default()
            .to_string();

        if directory_name.trim().is_empty() {
            return Err(DomainError::InvalidRequest(format!(
                "'{raw_name}' does not end with a project name"
            )));
        }
        if directory_name == "." || directory_name == ".." {
            return Err(DomainError::InvalidRequest(format!(
                "'{raw_name}' resolves to the reserved directory '{directory_name}'"
            )));
        }

        Ok(Self {
            directory_name,
            module_identity,
        })
    }

    /// Filesystem-safe directory name (final path segment, lower-cased).
    pub fn directory_name(&self) -> &str {
        &self.directory_name
    }

    /// Module path written into the dependency manifest.
    pub fn module_identity(&self) -> &str {
        &self.module_identity
    }
}

impl fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.directory_name == self.module_identity {
            f.write_str(&self.directory_name)
        } else {
            write!(f, "{} ({})", self.directory_name, self.module_identity)
        }
    }
}
