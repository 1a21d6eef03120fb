//! `popcat init`: create a default configuration file.

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Create a default configuration file at `--config`, or the platform
/// location when no path was given.
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    _config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    output.info("Initialising configuration...")?;

    let config_path = AppConfig::resolve_path(global.config.as_ref());

    // Bail early if the file already exists and --force was not given.
    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let default_config = AppConfig::default();
    let toml = toml::to_string_pretty(&default_config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    // Ensure parent directory exists.
    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CliError::IoError {
            message: format!("Failed to create config directory '{}'", parent.display()),
            source: e,
        })?;
    }

    std::fs::write(&config_path, &toml).map_err(|e| CliError::IoError {
        message: format!("Failed to write config to '{}'", config_path.display()),
        source: e,
    })?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;
    output.print(&format!(
        "Uploads will be stored in {}",
        default_config.storage.upload_dir.display()
    ))?;

    Ok(())
}
