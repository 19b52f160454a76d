//! Implementation of the `socle new` command.
//!
//! Responsibility: translate CLI arguments into a `ProjectRequest`, run the
//! core pipeline, and display progress and results. No business logic lives
//! here.

use std::path::Path;
use std::sync::Mutex;

use indicatif::ProgressBar;
use tracing::{debug, info, instrument};

use socle_core::{
    application::ports::PipelineObserver,
    domain::{
        FRAMEWORK_MODULE, Outcome, PipelineState, ProjectIdentity, ProjectRequest, Stage,
        TemplateSource,
    },
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `socle new` command.
///
/// 1. Build the request from flags, falling back to configured defaults
/// 2. Make sure the target directory is free (or replace it with `--force`)
/// 3. Run the pipeline with a progress observer
/// 4. Print next steps, or hand the failure to the error handler
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = build_request(&args, &config)?;
    let identity = request
        .identity()
        .map_err(|e| CliError::Core(e.into()))?;

    let workdir = std::env::current_dir().map_err(|e| CliError::IoError {
        message: "failed to read the current directory".into(),
        source: e,
    })?;

    debug!(
        directory = identity.directory_name(),
        module = identity.module_identity(),
        template = %request.effective_template_source(),
        "Request resolved"
    );

    let observer = ProgressObserver::new(output.clone());
    let service = super::build_service()
        .with_observer(Box::new(observer))
        .with_dependency_resolution(!args.skip_deps);

    let dir = service.prepare_target(&request, &workdir)?;

    show_summary(&request, &identity, dir.root(), &output)?;

    info!(path = %dir.root().display(), "Materialization started");
    match service.materialize(&request, &workdir) {
        Outcome::Success { directory_name } => {
            output.print("")?;
            output.success(&format!("Done building {}", identity.module_identity()))?;
            if !global.quiet {
                print_next_steps(&directory_name, args.skip_deps, &output)?;
            }
            Ok(())
        }
        Outcome::Failure(failure) => Err(CliError::Pipeline {
            failure,
            name: args.name,
            directory: dir.root().to_path_buf(),
        }),
    }
}

// ── Request construction ──────────────────────────────────────────────────────

/// Flags win over configuration; configuration wins over built-in defaults.
fn build_request(args: &NewArgs, config: &AppConfig) -> CliResult<ProjectRequest> {
    let source = match &args.template {
        Some(template) => TemplateSource::new(template.clone()),
        None => config.template_source(),
    }
    .with_depth(args.depth.unwrap_or(config.templates.depth));

    ProjectRequest::builder(args.name.clone())
        .architecture(args.architecture.unwrap_or(config.defaults.architecture))
        .database(args.database.unwrap_or(config.defaults.database))
        .http_framework(args.http_framework.unwrap_or(config.defaults.http))
        .render_engine(args.render_engine.unwrap_or(config.defaults.render))
        .modules(&args.modules)
        .force_overwrite(args.force)
        .template_source(source)
        .build()
        .map_err(|e| CliError::Core(e.into()))
}

// ── Progress reporting ────────────────────────────────────────────────────────

/// Draws one spinner per stage and leaves a line behind for each.
struct ProgressObserver {
    output: OutputManager,
    state: Mutex<PipelineState>,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressObserver {
    fn new(output: OutputManager) -> Self {
        Self {
            output,
            state: Mutex::new(PipelineState::Idle),
            spinner: Mutex::new(None),
        }
    }

    fn label(stage: Stage) -> String {
        format!(
            "[{}/{}] {}",
            stage.ordinal(),
            Stage::ALL.len(),
            stage.description()
        )
    }

    fn transition(&self, next: PipelineState) {
        if let Ok(mut state) = self.state.lock() {
            debug!(from = %*state, to = %next, "Pipeline state");
            *state = next;
        }
    }

    fn clear_spinner(&self) {
        if let Ok(mut spinner) = self.spinner.lock() {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl PipelineObserver for ProgressObserver {
    fn stage_started(&self, stage: Stage) {
        self.transition(PipelineState::Running(stage));
        if self.output.is_interactive() {
            if let Ok(mut spinner) = self.spinner.lock() {
                *spinner = Some(self.output.spinner(&Self::label(stage)));
            }
        }
    }

    fn stage_finished(&self, stage: Stage) {
        self.clear_spinner();
        let _ = self.output.success(&Self::label(stage));
        if stage == Stage::TriggeringResolution {
            self.transition(PipelineState::Done);
        }
    }

    fn stage_failed(&self, stage: Stage, _reason: &str) {
        self.clear_spinner();
        self.transition(PipelineState::Failed(stage));
        let _ = self.output.warning(&format!("{} (failed)", Self::label(stage)));
    }

    fn stage_skipped(&self, stage: Stage) {
        self.transition(PipelineState::Done);
        let _ = self.output.info(&format!("{} (skipped)", Self::label(stage)));
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_summary(
    request: &ProjectRequest,
    identity: &ProjectIdentity,
    root: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header(&format!("Creating '{}'", identity.directory_name()))?;
    out.kv("Module", identity.module_identity())?;
    out.kv("Architecture", request.architecture().as_str())?;
    out.kv("Database", request.database().as_str())?;
    out.kv("HTTP", request.http_framework().as_str())?;
    out.kv("Render", request.render_engine().as_str())?;
    if !request.modules().is_empty() {
        let modules: Vec<&str> = request.modules().iter().map(String::as_str).collect();
        out.kv("Modules", &modules.join(", "))?;
    }
    out.kv("Template", &request.effective_template_source().to_string())?;
    out.kv("Location", &root.display().to_string())?;
    out.print("")?;
    Ok(())
}

fn print_next_steps(directory_name: &str, skipped_deps: bool, out: &OutputManager) -> CliResult<()> {
    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!("  cd {directory_name}"))?;
    if skipped_deps {
        out.print(&format!("  go get {FRAMEWORK_MODULE}"))?;
        out.print("  go mod tidy")?;
    }
    out.print("  make")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
