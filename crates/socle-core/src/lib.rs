//! Socle Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Socle
//! project installer, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            socle-cli (CLI)              │
//! │   builds a ProjectRequest, reads Outcome│
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         MaterializeService              │
//! │  fetch → substitute → resolve artifact  │
//! │  → rewrite manifest → resolve deps      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ Fetcher, Filesystem, Secrets, Toolchain │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     socle-adapters (Infrastructure)     │
//! │  GitFetcher, LocalFilesystem, rand, ... │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use socle_core::prelude::*;
//!
//! let request = ProjectRequest::builder("org/myapp").build()?;
//! let service = MaterializeService::new(fetcher, filesystem, secrets, toolchain, assets);
//! match service.materialize(&request, Path::new(".")) {
//!     Outcome::Success { directory_name } => println!("created {directory_name}"),
//!     Outcome::Failure(failure) => eprintln!("{failure}"),
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        MaterializeService,
        ports::{
            AssetSource, CommandOutput, Filesystem, PipelineObserver, SecretGenerator,
            TemplateFetcher, Toolchain,
        },
    };
    pub use crate::domain::{
        Architecture, Database, HttpFramework, MaterializedDirectory, Outcome, PipelineFailure,
        PlaceholderMap, PlatformVariant, ProjectIdentity, ProjectRequest, RenderEngine, Stage,
        TemplateSource, ToolchainCommand,
    };
    pub use crate::error::{SocleError, SocleResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
