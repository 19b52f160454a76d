//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `SOCLE_*` environment variables, including those set by a `.env` file
//!    in the working directory
//! 3. Built-in defaults (always present)
//!
//! Nested keys use a double underscore: `SOCLE_TEMPLATES__URL`,
//! `SOCLE_DEFAULTS__DATABASE`, `SOCLE_OUTPUT__NO_COLOR`.

use std::collections::HashMap;

use anyhow::Context as _;
use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use socle_core::domain::{
    Architecture, DEFAULT_FETCH_DEPTH, DEFAULT_TEMPLATE_URL, Database, HttpFramework,
    RenderEngine, TemplateSource,
};

/// Environment variable prefix.
const ENV_PREFIX: &str = "SOCLE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Option values used when `socle new` is not given a flag.
    pub defaults: Defaults,
    /// Where the starter template comes from.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    pub architecture: Architecture,
    pub database: Database,
    pub http: HttpFramework,
    pub render: RenderEngine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub url: String,
    pub depth: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TEMPLATE_URL.into(),
            depth: DEFAULT_FETCH_DEPTH,
        }
    }
}

impl AppConfig {
    /// Load configuration from built-in defaults and the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::build(Environment::default())
    }

    /// Load configuration from defaults and an explicit variable map instead
    /// of the process environment.
    pub fn load_from(vars: HashMap<String, String>) -> anyhow::Result<Self> {
        Self::build(Environment::default().source(Some(vars)))
    }

    fn build(env: Environment) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to serialise built-in configuration defaults")?;

        let config: Self = Config::builder()
            .add_source(defaults)
            .add_source(
                env.prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read SOCLE_* environment variables")?
            .try_deserialize()
            .context("Invalid configuration value")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.templates.url.trim().is_empty() {
            anyhow::bail!("templates.url must not be empty");
        }
        if self.templates.depth == 0 {
            anyhow::bail!("templates.depth must be at least 1");
        }
        Ok(())
    }

    /// The template location described by this configuration.
    pub fn template_source(&self) -> TemplateSource {
        TemplateSource::new(self.templates.url.clone()).with_depth(self.templates.depth)
    }
}
