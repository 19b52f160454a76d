//! Core domain layer for Socle.
//!
//! Pure logic only: no filesystem, network or process calls. Everything that
//! touches the outside world goes through the ports in
//! `crate::application::ports`.
//!
//! - **Value objects**: option enums and the platform variant
//! - **Entities**: request, identity, placeholder map, outcome
//! - **Errors**: request validation failures

pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{
    MaterializedDirectory, Outcome, PipelineFailure, PipelineState, PlaceholderMap,
    ProjectIdentity, ProjectRequest, ProjectRequestBuilder, Stage, TemplateSource,
    ToolchainCommand,
    directory::{ENV_FILE, MANIFEST_FILE, VCS_METADATA_DIR},
    placeholder::{APP_NAME_TOKEN, KEY_TOKEN, SECRET_LENGTH},
    request::{DEFAULT_FETCH_DEPTH, DEFAULT_TEMPLATE_URL},
    toolchain::FRAMEWORK_MODULE,
};

pub use error::DomainError;

pub use value_objects::{
    Architecture, CANONICAL_BUILD_ARTIFACT, Database, HttpFramework, PlatformVariant,
    RenderEngine,
};
