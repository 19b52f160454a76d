//! `socle config`: inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Keys accepted by `socle config get`.
const KEYS: [&str; 7] = [
    "defaults.architecture",
    "defaults.database",
    "defaults.http",
    "defaults.render",
    "templates.url",
    "templates.depth",
    "output.no_color",
];

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(serialised.trim_end())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "defaults.architecture" => Ok(config.defaults.architecture.to_string()),
        "defaults.database" => Ok(config.defaults.database.to_string()),
        "defaults.http" => Ok(config.defaults.http.to_string()),
        "defaults.render" => Ok(config.defaults.render.to_string()),
        "templates.url" => Ok(config.templates.url.clone()),
        "templates.depth" => Ok(config.templates.depth.to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        _ => Err(CliError::ConfigError {
            message: format!(
                "Unknown config key: '{key}' (known keys: {})",
                KEYS.join(", ")
            ),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
