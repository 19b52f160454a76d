pub mod directory;
pub mod identity;
pub mod outcome;
pub mod placeholder;
pub mod request;
pub mod toolchain;

pub use directory::MaterializedDirectory;
pub use identity::ProjectIdentity;
pub use outcome::{Outcome, PipelineFailure, PipelineState, Stage};
pub use placeholder::PlaceholderMap;
pub use request::{ProjectRequest, ProjectRequestBuilder, TemplateSource};
pub use toolchain::ToolchainCommand;
