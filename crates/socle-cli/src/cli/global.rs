//! Flags accepted before or after any subcommand.

use clap::Args;

/// Verbosity and colour switches shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Show more diagnostics on stderr; repeat for more detail.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        long_help = "Show more diagnostics on stderr. Warnings are always shown; \
                     -v adds stage progress, -vv adds debug detail and -vvv traces everything."
    )]
    pub verbose: u8,

    /// Print errors only.
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI colours (also set by `NO_COLOR`).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,
}
