//! Subcommand handlers.
//!
//! Each handler turns parsed arguments into calls on the core service and
//! reports the result through [`crate::output::OutputManager`].

pub mod clean;
pub mod completions;
pub mod config;
pub mod new;

use socle_adapters::{
    BundledAssets, LocalFilesystem, ProcessToolchain, RandomSecretGenerator, SourceFetcher,
};
use socle_core::application::MaterializeService;

/// Wire the core service to the production adapters.
pub(crate) fn build_service() -> MaterializeService {
    MaterializeService::new(
        Box::new(SourceFetcher::default()),
        Box::new(LocalFilesystem::new()),
        Box::new(RandomSecretGenerator::new()),
        Box::new(ProcessToolchain::new()),
        Box::new(BundledAssets::new()),
    )
}
