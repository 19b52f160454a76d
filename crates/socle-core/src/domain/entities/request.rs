//! The project request and the template source it points at.
//!
//! A [`ProjectRequest`] is built exactly once per invocation by the CLI layer
//! and handed to the pipeline by reference. It has no setters: every option is
//! fixed at `build()` time.

use std::collections::BTreeSet;
use std::fmt;

use crate::domain::{
    Architecture, Database, DomainError, HttpFramework, ProjectIdentity, RenderEngine,
};

/// Starter repository used when the caller does not supply a template.
pub const DEFAULT_TEMPLATE_URL: &str = "https://gitlab.com/socle-framework/starter.git";

/// Shallow fetch depth used when the caller does not supply one.
pub const DEFAULT_FETCH_DEPTH: u32 = 1;

// ── TemplateSource ───────────────────────────────────────────────────────────

/// Where the template snapshot comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateSource {
    url: String,
    depth: u32,
}

impl TemplateSource {
    /// A source fetched at the default depth.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            depth: DEFAULT_FETCH_DEPTH,
        }
    }

    /// Override the fetch depth. A depth of zero is raised to one: a
    /// snapshot always carries the tip of the default branch.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth.max(1);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_URL)
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (depth {})", self.url, self.depth)
    }
}

// ── ProjectRequest ───────────────────────────────────────────────────────────

/// Everything the pipeline needs to materialize one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    raw_name: String,
    architecture: Architecture,
    database: Database,
    http_framework: HttpFramework,
    render_engine: RenderEngine,
    modules: BTreeSet<String>,
    force_overwrite: bool,
    template_source: Option<TemplateSource>,
}

impl ProjectRequest {
    /// Start building a request for `raw_name`.
    pub fn builder(raw_name: impl Into<String>) -> ProjectRequestBuilder {
        ProjectRequestBuilder {
            raw_name: raw_name.into(),
            architecture: Architecture::default(),
            database: Database::default(),
            http_framework: HttpFramework::default(),
            render_engine: RenderEngine::default(),
            modules: BTreeSet::new(),
            force_overwrite: false,
            template_source: None,
        }
    }

    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn database(&self) -> Database {
        self.database
    }

    pub fn http_framework(&self) -> HttpFramework {
        self.http_framework
    }

    pub fn render_engine(&self) -> RenderEngine {
        self.render_engine
    }

    pub fn modules(&self) -> &BTreeSet<String> {
        &self.modules
    }

    pub fn force_overwrite(&self) -> bool {
        self.force_overwrite
    }

    /// The caller-supplied template source, if any.
    pub fn template_source(&self) -> Option<&TemplateSource> {
        self.template_source.as_ref()
    }

    /// The source the pipeline will actually fetch.
    pub fn effective_template_source(&self) -> TemplateSource {
        self.template_source.clone().unwrap_or_default()
    }

    /// Derive the directory name and module identity for this request.
    pub fn identity(&self) -> Result<ProjectIdentity, DomainError> {
        ProjectIdentity::normalize(&self.raw_name)
    }
}

/// Builder for [`ProjectRequest`].
#[derive(Debug, Clone)]
pub struct ProjectRequestBuilder {
    raw_name: String,
    architecture: Architecture,
    database: Database,
    http_framework: HttpFramework,
    render_engine: RenderEngine,
    modules: BTreeSet<String>,
    force_overwrite: bool,
    template_source: Option<TemplateSource>,
}

impl ProjectRequestBuilder {
    pub fn architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = architecture;
        self
    }

    pub fn database(mut self, database: Database) -> Self {
        self.database = database;
        self
    }

    pub fn http_framework(mut self, http_framework: HttpFramework) -> Self {
        self.http_framework = http_framework;
        self
    }

    pub fn render_engine(mut self, render_engine: RenderEngine) -> Self {
        self.render_engine = render_engine;
        self
    }

    /// Add one optional module. Names are trimmed and lower-cased; blank
    /// names are ignored and duplicates collapse.
    pub fn module(mut self, module: impl AsRef<str>) -> Self {
        let module = module.as_ref().trim().to_lowercase();
        if !module.is_empty() {
            self.modules.insert(module);
        }
        self
    }

    pub fn modules<I, S>(self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        modules.into_iter().fold(self, |builder, m| builder.module(m))
    }

    pub fn force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    pub fn template_source(mut self, source: TemplateSource) -> Self {
        self.template_source = Some(source);
        self
    }

    /// Finish the request.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidRequest` when the project name is empty or blank.
    pub fn build(self) -> Result<ProjectRequest, DomainError> {
        if self.raw_name.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "project name cannot be empty".into(),
            ));
        }

        Ok(ProjectRequest {
            raw_name: self.raw_name,
            architecture: self.architecture,
            database: self.database,
            http_framework: self.http_framework,
            render_engine: self.render_engine,
            modules: self.modules,
            force_overwrite: self.force_overwrite,
            template_source: self.template_source,
        })
    }
}
