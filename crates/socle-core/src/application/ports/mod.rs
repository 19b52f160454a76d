//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `socle-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the pipeline, implemented by infrastructure
//!   - `TemplateFetcher`: obtains the template snapshot
//!   - `Filesystem`: file operations on the snapshot
//!   - `SecretGenerator`: application secret
//!   - `Toolchain`: dependency resolution commands
//!   - `AssetSource`: bundled environment and manifest templates
//!   - `PipelineObserver`: progress reporting
//!
//! - **Driving (Input) Ports**: `MaterializeService` itself, called by the CLI

pub mod output;

pub use output::{
    AssetSource, CommandOutput, Filesystem, NoopObserver, PipelineObserver, SecretGenerator,
    TemplateFetcher, Toolchain,
};

#[cfg(test)]
pub use output::{
    MockAssetSource, MockFilesystem, MockSecretGenerator, MockTemplateFetcher, MockToolchain,
};
