//! Templates compiled into the binary.

use socle_core::{application::ports::AssetSource, error::SocleResult};

const ENV_TEMPLATE: &str = include_str!("../assets/env.txt");
const MANIFEST_TEMPLATE: &str = include_str!("../assets/go.mod.txt");

/// The environment and manifest templates shipped with the installer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledAssets;

impl BundledAssets {
    pub fn new() -> Self {
        Self
    }
}

impl AssetSource for BundledAssets {
    fn env_template(&self) -> SocleResult<String> {
        Ok(ENV_TEMPLATE.to_string())
    }

    fn manifest_template(&self) -> SocleResult<String> {
        Ok(MANIFEST_TEMPLATE.to_string())
    }
}
