use std::path::{Path, PathBuf};

use crate::domain::{CANONICAL_BUILD_ARTIFACT, PlatformVariant};

/// Environment file rendered from the bundled template.
pub const ENV_FILE: &str = ".env";

/// Module/dependency manifest rewritten for the new project.
pub const MANIFEST_FILE: &str = "go.mod";

/// Version-control bookkeeping stripped after the fetch.
pub const VCS_METADATA_DIR: &str = ".git";

/// The on-disk tree produced by the fetch stage.
///
/// Later stages mutate it in place; none of them recreate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedDirectory {
    root: PathBuf,
}

impl MaterializedDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn env_file(&self) -> PathBuf {
        self.root.join(ENV_FILE)
    }

    pub fn manifest(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn vcs_metadata(&self) -> PathBuf {
        self.root.join(VCS_METADATA_DIR)
    }

    pub fn canonical_artifact(&self) -> PathBuf {
        self.root.join(CANONICAL_BUILD_ARTIFACT)
    }

    pub fn variant_artifact(&self, variant: PlatformVariant) -> PathBuf {
        self.root.join(variant.file_name())
    }
}
