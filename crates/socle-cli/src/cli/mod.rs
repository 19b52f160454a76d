//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};
use socle_core::domain::{Architecture, Database, HttpFramework, RenderEngine};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "socle",
    bin_name = "socle",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Create new Socle projects",
    long_about = "Socle clones the starter template, fills in the project \
                  name and a fresh secret key, picks the Makefile for this \
                  platform and resolves the Go dependencies.",
    after_help = "EXAMPLES:\n\
        \x20 socle new myapp\n\
        \x20 socle new github.com/acme/shop --db postgres --http gin\n\
        \x20 socle new demo --template ./starter --skip-deps\n\
        \x20 socle completions bash > /usr/share/bash-completion/completions/socle",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from the starter template.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 socle new myapp\n\
            \x20 socle new Org/MyApp --arch layered --db mysql\n\
            \x20 socle new myapp --force --template https://example.com/starter.git"
    )]
    New(NewArgs),

    /// Remove a project directory left behind by a failed run.
    #[command(
        about = "Remove a generated project",
        after_help = "EXAMPLES:\n\
            \x20 socle clean myapp\n\
            \x20 socle clean half-built --force"
    )]
    Clean(CleanArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 socle completions bash > ~/.local/share/bash-completion/completions/socle\n\
            \x20 socle completions zsh  > ~/.zfunc/_socle\n\
            \x20 socle completions fish > ~/.config/fish/completions/socle.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 socle config list\n\
            \x20 socle config get templates.url\n\
            \x20 SOCLE_DEFAULTS__DATABASE=postgres socle config get defaults.database"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `socle new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name. The last path segment becomes the directory name; the
    /// whole name (lowercased) becomes the Go module path.
    #[arg(value_name = "NAME", help = "Project name, e.g. myapp or github.com/org/myapp")]
    pub name: String,

    /// Architecture style.
    #[arg(short = 'a', long = "arch", value_name = "ARCH", help = "Architecture style")]
    pub architecture: Option<Architecture>,

    /// Database engine.
    #[arg(long = "db", value_name = "DATABASE", help = "Database engine")]
    pub database: Option<Database>,

    /// HTTP framework.
    #[arg(long = "http", value_name = "FRAMEWORK", help = "HTTP framework")]
    pub http_framework: Option<HttpFramework>,

    /// Template rendering engine.
    #[arg(long = "render", value_name = "ENGINE", help = "Template rendering engine")]
    pub render_engine: Option<RenderEngine>,

    /// Optional modules, comma separated.
    #[arg(
        long = "with",
        value_name = "MODULES",
        value_delimiter = ',',
        help = "Optional modules to enable (comma separated)"
    )]
    pub modules: Vec<String>,

    /// Template location: a git URL or a local directory.
    #[arg(
        long = "template",
        value_name = "URL|PATH",
        help = "Template repository URL or local directory"
    )]
    pub template: Option<String>,

    /// History depth for git templates.
    #[arg(
        long = "depth",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Clone depth for git templates"
    )]
    pub depth: Option<u32>,

    /// Overwrite an existing directory (destructive).
    #[arg(long = "force", help = "Replace an existing directory")]
    pub force: bool,

    /// Leave `go get` / `go mod tidy` to the user.
    #[arg(long = "skip-deps", help = "Do not run the Go toolchain")]
    pub skip_deps: bool,
}

// ── clean ─────────────────────────────────────────────────────────────────────

/// Arguments for `socle clean`.
#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Project name, as given to `socle new`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Remove the directory even if it does not look like a Socle project.
    #[arg(short = 'f', long = "force", help = "Remove without checking contents")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `socle completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `socle config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `templates.url`.
        key: String,
    },
    /// Print all configuration values.
    List,
}

// ── tests ─────────────────────────────────────────────────────────────────────
