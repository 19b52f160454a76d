//! Template fetchers.
//!
//! A template source is either a git remote or a directory on disk.
//! [`SourceFetcher`] inspects each source and hands it to the right one.

mod directory;
mod git;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use socle_core::{application::ports::TemplateFetcher, domain::TemplateSource, error::SocleResult};

pub use directory::DirectoryFetcher;
pub use git::GitFetcher;

/// What kind of location a template source string points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Git(String),
    Directory(PathBuf),
}

impl SourceKind {
    /// Classify a source string.
    ///
    /// `http`, `https`, `git`, `ssh` and `file` URLs and scp-like
    /// `git@host:path` strings are git remotes. Anything else is a path.
    pub fn classify(source: &str) -> Self {
        if let Ok(url) = Url::parse(source) {
            if matches!(url.scheme(), "https" | "http" | "git" | "ssh" | "file") {
                return Self::Git(source.to_string());
            }
        }

        if source.starts_with("git@") {
            return Self::Git(source.to_string());
        }

        Self::Directory(PathBuf::from(source))
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git(url) => write!(f, "git repository {url}"),
            Self::Directory(path) => write!(f, "local directory {}", path.display()),
        }
    }
}

/// Fetcher that dispatches on [`SourceKind`].
#[derive(Debug, Clone, Default)]
pub struct SourceFetcher {
    git: GitFetcher,
    directory: DirectoryFetcher,
}

impl SourceFetcher {
    pub fn new(git: GitFetcher, directory: DirectoryFetcher) -> Self {
        Self { git, directory }
    }
}

impl TemplateFetcher for SourceFetcher {
    fn fetch(&self, source: &TemplateSource, destination: &Path) -> SocleResult<()> {
        let kind = SourceKind::classify(source.url());
        debug!(%kind, "Template source classified");

        match kind {
            SourceKind::Git(_) => self.git.fetch(source, destination),
            SourceKind::Directory(_) => self.directory.fetch(source, destination),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_urls_are_git() {
        for url in [
            "https://gitlab.com/socle-framework/starter.git",
            "git://example.com/repo.git",
            "ssh://git@example.com/repo.git",
            "git@gitlab.com:socle-framework/starter.git",
        ] {
            assert_eq!(SourceKind::classify(url), SourceKind::Git(url.into()), "{url}");
        }
    }

    #[test]
    fn paths_are_directories() {
        for path in ["./starter", "/opt/templates/starter", "starter", "..\\starter"] {
            assert_eq!(
                SourceKind::classify(path),
                SourceKind::Directory(PathBuf::from(path)),
                "{path}"
            );
        }
    }
}
