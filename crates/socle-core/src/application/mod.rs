//! Application layer for Socle.
//!
//! - **Services**: `MaterializeService`, the pipeline orchestrator
//! - **Ports**: traits for everything outside the process
//! - **Errors**: stage and adapter failures
//!
//! The application layer sequences the domain operations but holds no rules
//! of its own about names, tokens or variants. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::MaterializeService;

pub use ports::{
    AssetSource, CommandOutput, Filesystem, NoopObserver, PipelineObserver, SecretGenerator,
    TemplateFetcher, Toolchain,
};

pub use error::ApplicationError;
