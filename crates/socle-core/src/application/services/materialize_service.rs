//! Materialize Service - the pipeline orchestrator.
//!
//! Runs the stages strictly in order against one target directory:
//! 1. Normalize the project name
//! 2. Fetch the template snapshot and strip its VCS metadata
//! 3. Render the environment file with a fresh secret
//! 4. Promote the host's build helper to the canonical Makefile
//! 5. Rewrite the module manifest and the sources that reference it
//! 6. Run dependency resolution
//!
//! There is no retry and no rollback. A failure at one stage leaves the
//! effects of the earlier stages on disk; `discard` removes them on request.

use std::path::Path;

use tracing::{debug, field, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{
            AssetSource, Filesystem, NoopObserver, PipelineObserver, SecretGenerator,
            TemplateFetcher, Toolchain,
        },
    },
    domain::{
        APP_NAME_TOKEN, ENV_FILE, MANIFEST_FILE, MaterializedDirectory, Outcome, PipelineFailure,
        PlaceholderMap, PlatformVariant, ProjectIdentity, ProjectRequest, SECRET_LENGTH, Stage,
        TemplateSource, ToolchainCommand,
    },
    error::{SocleError, SocleResult},
};

/// Source files whose module references are rewritten with the manifest.
const SOURCE_EXTENSION: &str = "go";

/// Main materialization service.
pub struct MaterializeService {
    fetcher: Box<dyn TemplateFetcher>,
    filesystem: Box<dyn Filesystem>,
    secrets: Box<dyn SecretGenerator>,
    toolchain: Box<dyn Toolchain>,
    assets: Box<dyn AssetSource>,
    observer: Box<dyn PipelineObserver>,
    host: PlatformVariant,
    dependency_resolution: bool,
}

impl MaterializeService {
    /// Create a service with the given adapters.
    ///
    /// Progress is not reported, the host platform is the one this binary
    /// was built for, and dependency resolution is enabled.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use socle_core::application::MaterializeService;
    ///
    /// let service = MaterializeService::new(
    ///     fetcher,    // impl TemplateFetcher
    ///     filesystem, // impl Filesystem
    ///     secrets,    // impl SecretGenerator
    ///     toolchain,  // impl Toolchain
    ///     assets,     // impl AssetSource
    /// );
    /// ```
    pub fn new(
        fetcher: Box<dyn TemplateFetcher>,
        filesystem: Box<dyn Filesystem>,
        secrets: Box<dyn SecretGenerator>,
        toolchain: Box<dyn Toolchain>,
        assets: Box<dyn AssetSource>,
    ) -> Self {
        Self {
            fetcher,
            filesystem,
            secrets,
            toolchain,
            assets,
            observer: Box::new(NoopObserver),
            host: PlatformVariant::host(),
            dependency_resolution: true,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_host_platform(mut self, host: PlatformVariant) -> Self {
        self.host = host;
        self
    }

    /// Enable or skip the final dependency resolution stage.
    pub fn with_dependency_resolution(mut self, enabled: bool) -> Self {
        self.dependency_resolution = enabled;
        self
    }

    /// Make sure the target directory for `request` is free.
    ///
    /// An existing directory is removed when the request allows overwriting
    /// and reported as `ProjectExists` otherwise, with its contents left
    /// untouched.
    pub fn prepare_target(
        &self,
        request: &ProjectRequest,
        workdir: &Path,
    ) -> SocleResult<MaterializedDirectory> {
        let identity = request.identity()?;
        let dir = MaterializedDirectory::new(workdir.join(identity.directory_name()));

        if self.filesystem.exists(dir.root()) {
            if !request.force_overwrite() {
                return Err(ApplicationError::ProjectExists {
                    path: dir.root().to_path_buf(),
                }
                .into());
            }
            warn!(path = %dir.root().display(), "Removing existing directory");
            self.filesystem.remove_dir_all(dir.root())?;
        }

        Ok(dir)
    }

    /// Materialize `request` under `workdir`.
    ///
    /// Never panics on pipeline errors: every failure is returned as
    /// `Outcome::Failure` naming the stage it happened in.
    #[instrument(
        skip_all,
        fields(
            project = %request.raw_name(),
            workdir = %workdir.display(),
            run_id = field::Empty,
        )
    )]
    pub fn materialize(&self, request: &ProjectRequest, workdir: &Path) -> Outcome {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", field::display(run_id));

        info!(
            architecture = %request.architecture(),
            database = %request.database(),
            http = %request.http_framework(),
            render = %request.render_engine(),
            modules = ?request.modules(),
            "Materializing project"
        );

        match self.run(request, workdir) {
            Ok(directory_name) => {
                info!(directory = %directory_name, "Project materialized");
                Outcome::Success { directory_name }
            }
            Err(failure) => {
                warn!(stage = %failure.stage, error = %failure.cause, "Materialization failed");
                Outcome::Failure(failure)
            }
        }
    }

    fn run(&self, request: &ProjectRequest, workdir: &Path) -> Result<String, PipelineFailure> {
        let identity = self.stage(Stage::Normalizing, || Ok(request.identity()?))?;
        let dir = MaterializedDirectory::new(workdir.join(identity.directory_name()));
        let source = request.effective_template_source();

        self.stage(Stage::Fetching, || self.fetch_template(&source, &dir))?;
        self.stage(Stage::Substituting, || self.write_env_file(&dir, &identity))?;
        self.stage(Stage::ResolvingArtifact, || {
            self.resolve_build_artifact(&dir, self.host)
        })?;
        self.stage(Stage::RewritingManifest, || self.rewrite_manifest(&dir, &identity))?;

        if self.dependency_resolution {
            self.stage(Stage::TriggeringResolution, || self.resolve_dependencies(&dir))?;
        } else {
            info!("Dependency resolution skipped");
            self.observer.stage_skipped(Stage::TriggeringResolution);
        }

        Ok(identity.directory_name().to_string())
    }

    /// Run one stage, reporting its transitions and tagging its error.
    fn stage<T>(
        &self,
        stage: Stage,
        op: impl FnOnce() -> SocleResult<T>,
    ) -> Result<T, PipelineFailure> {
        debug!(%stage, "Stage started");
        self.observer.stage_started(stage);

        match op() {
            Ok(value) => {
                debug!(%stage, "Stage finished");
                self.observer.stage_finished(stage);
                Ok(value)
            }
            Err(cause) => {
                self.observer.stage_failed(stage, &cause.to_string());
                Err(PipelineFailure::new(stage, cause))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Stages
    // -------------------------------------------------------------------------

    /// Fetch the snapshot into `dir` and strip its VCS metadata.
    pub fn fetch_template(
        &self,
        source: &TemplateSource,
        dir: &MaterializedDirectory,
    ) -> SocleResult<()> {
        info!(source = %source, target = %dir.root().display(), "Fetching template");

        let as_fetch_error = |err: SocleError| -> SocleError {
            match err {
                SocleError::Application(ApplicationError::Fetch { .. }) => err,
                other => ApplicationError::Fetch {
                    url: source.url().to_string(),
                    reason: other.reason(),
                }
                .into(),
            }
        };

        self.fetcher.fetch(source, dir.root()).map_err(as_fetch_error)?;

        let vcs = dir.vcs_metadata();
        if self.filesystem.exists(&vcs) {
            debug!(path = %vcs.display(), "Stripping VCS metadata");
            self.filesystem.remove_dir_all(&vcs).map_err(as_fetch_error)?;
        }

        Ok(())
    }

    /// Render the bundled environment template into `<dir>/.env`.
    ///
    /// The secret is generated here, once per call, and never logged.
    pub fn write_env_file(
        &self,
        dir: &MaterializedDirectory,
        identity: &ProjectIdentity,
    ) -> SocleResult<()> {
        let path = dir.env_file();
        let substitution_error = |err: SocleError| -> SocleError {
            ApplicationError::Substitution {
                path: path.clone(),
                reason: err.reason(),
            }
            .into()
        };

        let template = self.assets.env_template().map_err(substitution_error)?;
        let secret = self.secrets.generate(SECRET_LENGTH);
        let rendered = PlaceholderMap::for_project(identity, secret).render(&template);

        self.filesystem
            .write_file(&path, &rendered)
            .map_err(substitution_error)?;

        debug!(file = ENV_FILE, "Environment file written");
        Ok(())
    }

    /// Copy the `host` variant to the canonical build file, then delete
    /// every variant file.
    ///
    /// Fails with `MissingVariant` when the host's file is absent; the other
    /// variants are optional.
    pub fn resolve_build_artifact(
        &self,
        dir: &MaterializedDirectory,
        host: PlatformVariant,
    ) -> SocleResult<()> {
        let selected = dir.variant_artifact(host);
        if !self.filesystem.exists(&selected) {
            return Err(ApplicationError::MissingVariant {
                variant: host,
                path: selected,
            }
            .into());
        }

        let canonical = dir.canonical_artifact();
        self.filesystem.copy_file(&selected, &canonical)?;
        debug!(from = %selected.display(), to = %canonical.display(), "Build file promoted");

        for variant in PlatformVariant::ALL {
            let path = dir.variant_artifact(variant);
            if self.filesystem.exists(&path) {
                self.filesystem.remove_file(&path)?;
            }
        }

        Ok(())
    }

    /// Replace the manifest with the bundled one and point the sources at
    /// the new module identity.
    ///
    /// Returns the number of source files that were rewritten.
    pub fn rewrite_manifest(
        &self,
        dir: &MaterializedDirectory,
        identity: &ProjectIdentity,
    ) -> SocleResult<usize> {
        let manifest = dir.manifest();
        let manifest_error = |path: &Path| {
            let path = path.to_path_buf();
            move |err: SocleError| -> SocleError {
                ApplicationError::Manifest {
                    path,
                    reason: err.reason(),
                }
                .into()
            }
        };

        if self.filesystem.exists(&manifest) {
            self.filesystem
                .remove_file(&manifest)
                .map_err(manifest_error(manifest.as_path()))?;
        }

        let placeholders = PlaceholderMap::for_module(identity);
        let template = self
            .assets
            .manifest_template()
            .map_err(manifest_error(manifest.as_path()))?;
        self.filesystem
            .write_file(&manifest, &placeholders.render(&template))
            .map_err(manifest_error(manifest.as_path()))?;
        debug!(file = MANIFEST_FILE, module = identity.module_identity(), "Manifest written");

        let sources = self
            .filesystem
            .find_files(dir.root(), SOURCE_EXTENSION)
            .map_err(manifest_error(dir.root()))?;

        let mut rewritten = 0;
        for path in sources {
            let changed = self
                .rewrite_source(&path, &placeholders)
                .map_err(manifest_error(path.as_path()))?;
            if changed {
                rewritten += 1;
            }
        }

        info!(rewritten, "Module references updated");
        Ok(rewritten)
    }

    fn rewrite_source(&self, path: &Path, placeholders: &PlaceholderMap) -> SocleResult<bool> {
        let content = self.filesystem.read_to_string(path)?;
        if !content.contains(APP_NAME_TOKEN) {
            return Ok(false);
        }
        self.filesystem.write_file(path, &placeholders.render(&content))?;
        Ok(true)
    }

    /// Run the toolchain commands that fetch the framework and tidy the
    /// manifest, in order, inside `dir`.
    pub fn resolve_dependencies(&self, dir: &MaterializedDirectory) -> SocleResult<()> {
        for command in ToolchainCommand::dependency_resolution() {
            info!(%command, "Running toolchain command");

            let output = self.toolchain.run(&command, dir.root()).map_err(|err| {
                ApplicationError::DependencyResolution {
                    command: command.to_string(),
                    status: None,
                    stderr: err.reason(),
                }
            })?;

            if !output.stdout.is_empty() {
                debug!(%command, stdout = %output.stdout.trim(), "Toolchain output");
            }

            if !output.success() {
                return Err(ApplicationError::DependencyResolution {
                    command: command.to_string(),
                    status: output.status,
                    stderr: output.stderr.trim().to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Cleanup
    // -------------------------------------------------------------------------

    /// Remove a (possibly partially) materialized directory.
    ///
    /// Returns `false` when there was nothing to remove. Unless `force` is
    /// set, a directory holding neither an environment file nor a manifest
    /// is refused: it was most likely not produced by this tool.
    #[instrument(skip_all, fields(path = %dir.root().display(), force = force))]
    pub fn discard(&self, dir: &MaterializedDirectory, force: bool) -> SocleResult<bool> {
        if !self.filesystem.exists(dir.root()) {
            debug!("Nothing to discard");
            return Ok(false);
        }

        let looks_materialized =
            self.filesystem.exists(&dir.env_file()) || self.filesystem.exists(&dir.manifest());
        if !looks_materialized && !force {
            return Err(ApplicationError::Cleanup {
                path: dir.root().to_path_buf(),
                reason: format!(
                    "no {ENV_FILE} or {MANIFEST_FILE} found, refusing to delete without --force"
                ),
            }
            .into());
        }

        self.filesystem.remove_dir_all(dir.root()).map_err(|err| {
            ApplicationError::Cleanup {
                path: dir.root().to_path_buf(),
                reason: err.reason(),
            }
        })?;

        info!("Directory discarded");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::{
        CommandOutput, MockAssetSource, MockFilesystem, MockSecretGenerator, MockTemplateFetcher,
        MockToolchain,
    };
    use crate::domain::{CANONICAL_BUILD_ARTIFACT, KEY_TOKEN};

    const ENV_TEMPLATE: &str = "APP_NAME=${APP_NAME}\nKEY=${KEY}\n";
    const MANIFEST_TEMPLATE: &str = "module ${APP_NAME}\n\ngo 1.22\n";

    /// In-memory filesystem shared between the test and the service.
    #[derive(Clone, Default)]
    struct FakeFs {
        files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    }

    impl FakeFs {
        fn with_files(files: &[(&str, &str)]) -> Self {
            let fs = Self::default();
            for (path, content) in files {
                fs.files
                    .lock()
                    .unwrap()
                    .insert(PathBuf::from(path), (*content).to_string());
            }
            fs
        }

        fn get(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }

        fn paths(&self) -> Vec<PathBuf> {
            self.files.lock().unwrap().keys().cloned().collect()
        }
    }

    impl Filesystem for FakeFs {
        fn read_to_string(&self, path: &Path) -> SocleResult<String> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| {
                    ApplicationError::Filesystem {
                        path: path.to_path_buf(),
                        reason: "not found".into(),
                    }
                    .into()
                })
        }

        fn write_file(&self, path: &Path, content: &str) -> SocleResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn copy_file(&self, from: &Path, to: &Path) -> SocleResult<()> {
            let content = self.read_to_string(from)?;
            self.write_file(to, &content)
        }

        fn remove_file(&self, path: &Path) -> SocleResult<()> {
            self.files.lock().unwrap().remove(path);
            Ok(())
        }

        fn remove_dir_all(&self, path: &Path) -> SocleResult<()> {
            self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().keys().any(|p| p.starts_with(path))
        }

        fn find_files(&self, root: &Path, extension: &str) -> SocleResult<Vec<PathBuf>> {
            Ok(self
                .paths()
                .into_iter()
                .filter(|p| p.starts_with(root))
                .filter(|p| p.extension().is_some_and(|ext| ext == extension))
                .collect())
        }
    }

    /// Fetcher that drops a fixed set of files under the destination.
    fn fetcher_writing(fs: &FakeFs, files: &'static [(&'static str, &'static str)]) -> MockTemplateFetcher {
        let fs = fs.clone();
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().times(1).returning(move |_, dest| {
            for (rel, content) in files {
                fs.write_file(&dest.join(rel), content)?;
            }
            Ok(())
        });
        fetcher
    }

    fn secrets() -> MockSecretGenerator {
        let mut secrets = MockSecretGenerator::new();
        secrets
            .expect_generate()
            .withf(|len| *len == SECRET_LENGTH)
            .returning(|len| "s".repeat(len));
        secrets
    }

    fn assets() -> MockAssetSource {
        let mut assets = MockAssetSource::new();
        assets
            .expect_env_template()
            .returning(|| Ok(ENV_TEMPLATE.to_string()));
        assets
            .expect_manifest_template()
            .returning(|| Ok(MANIFEST_TEMPLATE.to_string()));
        assets
    }

    fn succeeding_toolchain(calls: Arc<Mutex<Vec<String>>>) -> MockToolchain {
        let mut toolchain = MockToolchain::new();
        toolchain.expect_run().times(2).returning(move |command, _| {
            calls.lock().unwrap().push(command.to_string());
            Ok(CommandOutput {
                status: Some(0),
                ..CommandOutput::default()
            })
        });
        toolchain
    }

    const SNAPSHOT: &[(&str, &str)] = &[
        (".git/HEAD", "ref: refs/heads/main"),
        ("Makefile.mac", "unix build"),
        ("Makefile.windows", "windows build"),
        ("go.mod", "module starter"),
        ("main.go", "import \"${APP_NAME}/internal\""),
        ("internal/app.go", "package internal"),
    ];

    #[test]
    fn full_pipeline_materializes_the_snapshot() {
        let fs = FakeFs::default();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let service = MaterializeService::new(
            Box::new(fetcher_writing(&fs, SNAPSHOT)),
            Box::new(fs.clone()),
            Box::new(secrets()),
            Box::new(succeeding_toolchain(calls.clone())),
            Box::new(assets()),
        )
        .with_host_platform(PlatformVariant::Unix);

        let request = ProjectRequest::builder("Org/MyApp").build().unwrap();
        let outcome = service.materialize(&request, Path::new("/work"));

        assert_eq!(outcome.into_result().unwrap(), "myapp");
        assert!(!fs.exists(Path::new("/work/myapp/.git")));
        assert_eq!(
            fs.get("/work/myapp/.env").unwrap(),
            format!("APP_NAME=myapp\nKEY={}\n", "s".repeat(SECRET_LENGTH))
        );
        assert_eq!(fs.get("/work/myapp/Makefile").unwrap(), "unix build");
        assert!(fs.get("/work/myapp/Makefile.mac").is_none());
        assert!(fs.get("/work/myapp/Makefile.windows").is_none());
        assert_eq!(
            fs.get("/work/myapp/go.mod").unwrap(),
            "module org/myapp\n\ngo 1.22\n"
        );
        assert_eq!(
            fs.get("/work/myapp/main.go").unwrap(),
            "import \"org/myapp/internal\""
        );
        assert_eq!(
            *calls.lock().unwrap(),
            ["go get gitlab.com/socle-framework/socle", "go mod tidy"]
        );
    }

    #[test]
    fn invalid_name_fails_before_any_side_effect() {
        // Mocks without expectations panic if called.
        let service = MaterializeService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(MockFilesystem::new()),
            Box::new(MockSecretGenerator::new()),
            Box::new(MockToolchain::new()),
            Box::new(MockAssetSource::new()),
        );

        let request = ProjectRequest::builder("org/").build().unwrap();
        let failure = service
            .materialize(&request, Path::new("/work"))
            .into_result()
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Normalizing);
        assert!(matches!(failure.cause, SocleError::Domain(_)));
    }

    #[test]
    fn fetch_failure_stops_the_pipeline() {
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().returning(|source, _| {
            Err(ApplicationError::Fetch {
                url: source.url().to_string(),
                reason: "network unreachable".into(),
            }
            .into())
        });

        let service = MaterializeService::new(
            Box::new(fetcher),
            Box::new(MockFilesystem::new()),
            Box::new(MockSecretGenerator::new()),
            Box::new(MockToolchain::new()),
            Box::new(MockAssetSource::new()),
        );

        let request = ProjectRequest::builder("demo").build().unwrap();
        let failure = service
            .materialize(&request, Path::new("/work"))
            .into_result()
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Fetching);
        assert!(failure.cause.to_string().contains("network unreachable"));
    }

    #[test]
    fn non_fetch_errors_from_the_fetcher_are_relabelled() {
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().returning(|_, dest| {
            Err(ApplicationError::Filesystem {
                path: dest.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });

        let service = MaterializeService::new(
            Box::new(fetcher),
            Box::new(MockFilesystem::new()),
            Box::new(MockSecretGenerator::new()),
            Box::new(MockToolchain::new()),
            Box::new(MockAssetSource::new()),
        );

        let err = service
            .fetch_template(
                &TemplateSource::new("https://example.com/t.git"),
                &MaterializedDirectory::new("/work/demo"),
            )
            .unwrap_err();

        match err {
            SocleError::Application(ApplicationError::Fetch { url, reason }) => {
                assert_eq!(url, "https://example.com/t.git");
                assert_eq!(reason, "disk full");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_host_variant_fails_and_keeps_earlier_effects() {
        const NO_WINDOWS: &[(&str, &str)] = &[("Makefile.mac", "unix build")];
        let fs = FakeFs::default();
        let service = MaterializeService::new(
            Box::new(fetcher_writing(&fs, NO_WINDOWS)),
            Box::new(fs.clone()),
            Box::new(secrets()),
            Box::new(MockToolchain::new()),
            Box::new(assets()),
        )
        .with_host_platform(PlatformVariant::Windows);

        let request = ProjectRequest::builder("demo").build().unwrap();
        let failure = service
            .materialize(&request, Path::new("/work"))
            .into_result()
            .unwrap_err();

        assert_eq!(failure.stage, Stage::ResolvingArtifact);
        assert!(matches!(
            failure.cause,
            SocleError::Application(ApplicationError::MissingVariant {
                variant: PlatformVariant::Windows,
                ..
            })
        ));
        // No rollback: the env file from the previous stage is still there.
        assert!(fs.get("/work/demo/.env").is_some());
        assert!(fs.get("/work/demo/go.mod").is_none());
    }

    #[test]
    fn only_the_canonical_artifact_survives() {
        let fs = FakeFs::with_files(&[
            ("/p/Makefile.mac", "mac"),
            ("/p/Makefile.windows", "win"),
        ]);
        let service = MaterializeService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(fs.clone()),
            Box::new(MockSecretGenerator::new()),
            Box::new(MockToolchain::new()),
            Box::new(MockAssetSource::new()),
        );

        service
            .resolve_build_artifact(&MaterializedDirectory::new("/p"), PlatformVariant::Windows)
            .unwrap();

        let artifacts: Vec<_> = fs
            .paths()
            .into_iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(CANONICAL_BUILD_ARTIFACT))
            })
            .collect();
        assert_eq!(artifacts, [PathBuf::from("/p/Makefile")]);
        assert_eq!(fs.get("/p/Makefile").unwrap(), "win");
    }

    #[test]
    fn missing_non_host_variant_is_ignored() {
        let fs = FakeFs::with_files(&[("/p/Makefile.mac", "mac")]);
        let service = MaterializeService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(fs.clone()),
            Box::new(MockSecretGenerator::new()),
            Box::new(MockToolchain::new()),
            Box::new(MockAssetSource::new()),
        );

        service
            .resolve_build_artifact(&MaterializedDirectory::new("/p"), PlatformVariant::Unix)
            .unwrap();
        assert_eq!(fs.paths(), [PathBuf::from("/p/Makefile")]);
    }

    #[test]
    fn env_file_overwrites_existing_and_leaves_unknown_tokens() {
        let fs = FakeFs::with_files(&[("/p/.env", "stale")]);
        let mut assets = MockAssetSource::new();
        assets
            .expect_env_template()
            .returning(|| Ok("A=${APP_NAME}\nK=${KEY}\nX=${UNKNOWN}\n".to_string()));

        let service = MaterializeService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(fs.clone()),
            Box::new(secrets()),
            Box::new(MockToolchain::new()),
            Box::new(assets),
        );

        let identity = ProjectIdentity::normalize("demo").unwrap();
        service
            .write_env_file(&MaterializedDirectory::new("/p"), &identity)
            .unwrap();

        let env = fs.get("/p/.env").unwrap();
        assert!(env.starts_with("A=demo\n"));
        assert!(env.contains("X=${UNKNOWN}"));
        assert!(!env.contains(KEY_TOKEN));
    }

    #[test]
    fn asset_failure_is_a_substitution_error() {
        let mut assets = MockAssetSource::new();
        assets.expect_env_template().returning(|| {
            Err(SocleError::Internal {
                message: "asset missing".into(),
            })
        });

        let service = MaterializeService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(FakeFs::default()),
            Box::new(MockSecretGenerator::new()),
            Box::new(MockToolchain::new()),
            Box::new(assets),
        );

        let identity = ProjectIdentity::normalize("demo").unwrap();
        let err = service
            .write_env_file(&MaterializedDirectory::new("/p"), &identity)
            .unwrap_err();
        assert!(matches!(
            err,
            SocleError::Application(ApplicationError::Substitution { .. })
        ));
    }

    #[test]
    fn manifest_write_failure_is_a_manifest_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: "read-only filesystem".into(),
            }
            .into())
        });

        let service = MaterializeService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(fs),
            Box::new(MockSecretGenerator::new()),
            Box::new(MockToolchain::new()),
            Box::new(assets()),
        );

        let identity = ProjectIdentity::normalize("org/demo").unwrap();
        let err = service
            .rewrite_manifest(&MaterializedDirectory::new("/p"), &identity)
            .unwrap_err();

        match err {
            SocleError::Application(ApplicationError::Manifest { path, reason }) => {
                assert_eq!(path, PathBuf::from("/p/go.mod"));
                assert_eq!(reason, "read-only filesystem");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn sources_without_the_token_are_untouched() {
        let fs = FakeFs::with_files(&[
            ("/p/a.go", "package a"),
            ("/p/b.go", "import \"${APP_NAME}/a\""),
            ("/p/README.md", "${APP_NAME}"),
        ]);
        let service = MaterializeService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(fs.clone()),
            Box::new(MockSecretGenerator::new()),
            Box::new(MockToolchain::new()),
            Box::new(assets()),
        );

        let identity = ProjectIdentity::normalize("github.com/acme/demo").unwrap();
        let rewritten = service
            .rewrite_manifest(&MaterializedDirectory::new("/p"), &identity)
            .unwrap();

        assert_eq!(rewritten, 1);
        assert_eq!(fs.get("/p/a.go").unwrap(), "package a");
        assert_eq!(fs.get("/p/b.go").unwrap(), "import \"github.com/acme/demo/a\"");
        assert_eq!(fs.get("/p/README.md").unwrap(), "${APP_NAME}");
    }

    #[test]
    fn nonzero_toolchain_exit_is_captured() {
        let mut toolchain = MockToolchain::new();
        toolchain.expect_run().times(1).returning(|_, _| {
            Ok(CommandOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: "module lookup disabled\n".into(),
            })
        });

        let service = MaterializeService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(FakeFs::default()),
            Box::new(MockSecretGenerator::new()),
            Box::new(toolchain),
            Box::new(MockAssetSource::new()),
        );

        let err = service
            .resolve_dependencies(&MaterializedDirectory::new("/p"))
            .unwrap_err();

        match err {
            SocleError::Application(ApplicationError::DependencyResolution {
                command,
                status,
                stderr,
            }) => {
                assert_eq!(command, "go get gitlab.com/socle-framework/socle");
                assert_eq!(status, Some(1));
                assert_eq!(stderr, "module lookup disabled");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn spawn_failure_has_no_status() {
        let mut toolchain = MockToolchain::new();
        toolchain.expect_run().returning(|_, _| {
            Err(SocleError::Internal {
                message: "go: not found".into(),
            })
        });

        let service = MaterializeService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(FakeFs::default()),
            Box::new(MockSecretGenerator::new()),
            Box::new(toolchain),
            Box::new(MockAssetSource::new()),
        );

        let err = service
            .resolve_dependencies(&MaterializedDirectory::new("/p"))
            .unwrap_err();
        assert!(matches!(
            err,
            SocleError::Application(ApplicationError::DependencyResolution { status: None, .. })
        ));
    }

    #[test]
    fn skipping_dependency_resolution_still_succeeds() {
        let fs = FakeFs::default();
        let service = MaterializeService::new(
            Box::new(fetcher_writing(&fs, SNAPSHOT)),
            Box::new(fs.clone()),
            Box::new(secrets()),
            Box::new(MockToolchain::new()),
            Box::new(assets()),
        )
        .with_host_platform(PlatformVariant::Unix)
        .with_dependency_resolution(false);

        let request = ProjectRequest::builder("demo").build().unwrap();
        assert!(service.materialize(&request, Path::new("/w")).is_success());
    }

    #[test]
    fn observer_sees_every_stage_in_order() {
        #[derive(Default)]
        struct Recorder(Mutex<Vec<String>>);

        impl PipelineObserver for Arc<Recorder> {
            fn stage_started(&self, stage: Stage) {
                self.0.lock().unwrap().push(format!("start {stage}"));
            }
            fn stage_skipped(&self, stage: Stage) {
                self.0.lock().unwrap().push(format!("skip {stage}"));
            }
        }

        let recorder = Arc::new(Recorder::default());
        let fs = FakeFs::default();
        let service = MaterializeService::new(
            Box::new(fetcher_writing(&fs, SNAPSHOT)),
            Box::new(fs.clone()),
            Box::new(secrets()),
            Box::new(MockToolchain::new()),
            Box::new(assets()),
        )
        .with_host_platform(PlatformVariant::Unix)
        .with_dependency_resolution(false)
        .with_observer(Box::new(recorder.clone()));

        let request = ProjectRequest::builder("demo").build().unwrap();
        assert!(service.materialize(&request, Path::new("/w")).is_success());

        let events = recorder.0.lock().unwrap().clone();
        assert_eq!(
            events,
            [
                "start normalizing",
                "start fetching",
                "start substituting",
                "start resolving-artifact",
                "start rewriting-manifest",
                "skip triggering-resolution",
            ]
        );
    }

    #[test]
    fn prepare_target_refuses_existing_directory_without_force() {
        let fs = FakeFs::with_files(&[("/w/demo/keep.txt", "mine")]);
        let service = MaterializeService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(fs.clone()),
            Box::new(MockSecretGenerator::new()),
            Box::new(MockToolchain::new()),
            Box::new(MockAssetSource::new()),
        );

        let request = ProjectRequest::builder("demo").build().unwrap();
        let err = service.prepare_target(&request, Path::new("/w")).unwrap_err();
        assert!(matches!(
            err,
            SocleError::Application(ApplicationError::ProjectExists { .. })
        ));
        assert_eq!(fs.get("/w/demo/keep.txt").unwrap(), "mine");

        let forced = ProjectRequest::builder("demo")
            .force_overwrite(true)
            .build()
            .unwrap();
        let dir = service.prepare_target(&forced, Path::new("/w")).unwrap();
        assert_eq!(dir.root(), Path::new("/w/demo"));
        assert!(fs.paths().is_empty());
    }

    #[test]
    fn discard_refuses_foreign_directories_unless_forced() {
        let fs = FakeFs::with_files(&[("/w/photos/cat.jpg", "")]);
        let service = MaterializeService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(fs.clone()),
            Box::new(MockSecretGenerator::new()),
            Box::new(MockToolchain::new()),
            Box::new(MockAssetSource::new()),
        );
        let dir = MaterializedDirectory::new("/w/photos");

        assert!(service.discard(&dir, false).is_err());
        assert!(fs.get("/w/photos/cat.jpg").is_some());

        assert!(service.discard(&dir, true).unwrap());
        assert!(!service.discard(&dir, false).unwrap());
    }

    #[test]
    fn discard_removes_materialized_directories() {
        let fs = FakeFs::with_files(&[("/w/demo/go.mod", "module demo"), ("/w/demo/x.go", "")]);
        let service = MaterializeService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(fs.clone()),
            Box::new(MockSecretGenerator::new()),
            Box::new(MockToolchain::new()),
            Box::new(MockAssetSource::new()),
        );

        assert!(service.discard(&MaterializedDirectory::new("/w/demo"), false).unwrap());
        assert!(fs.paths().is_empty());
    }
}
