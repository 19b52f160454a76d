//! Infrastructure adapters for Socle.
//!
//! This crate implements the ports defined in `socle-core::application::ports`.
//! It owns every network, filesystem and process call the pipeline makes.

pub mod assets;
pub mod fetcher;
pub mod filesystem;
pub mod secrets;
pub mod toolchain;

// Re-export commonly used adapters
pub use assets::BundledAssets;
pub use fetcher::{DirectoryFetcher, GitFetcher, SourceFetcher, SourceKind};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use secrets::RandomSecretGenerator;
pub use toolchain::ProcessToolchain;
