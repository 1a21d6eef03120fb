//! `popcat config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

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
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "storage.upload_dir" => Ok(config.storage.upload_dir.display().to_string()),
        "storage.url_prefix" => Ok(config.storage.url_prefix.clone()),
        "storage.catalog_file" => Ok(config.storage.catalog_file.display().to_string()),
        "admin.ids" => Ok(config.admin.ids.join(",")),
        "admin.owner_code" => Ok(config.admin.owner_code.clone()),
        "uploads.max_megabytes" => Ok(config.uploads.max_megabytes.to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
