//! `pyscaff init`: create a default configuration file.

use std::path::Path;

use crate::{
    cli::{GlobalArgs, InitArgs},
    commands::config::to_toml,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Create a default pyscaff configuration file at `--config` or the
/// platform path.
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    output: OutputManager,
) -> CliResult<()> {
    output.info("Initialising configuration...")?;

    let config_path = global.config.unwrap_or_else(AppConfig::config_path);

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    write_default(&config_path)?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}

fn write_default(path: &Path) -> CliResult<()> {
    let text = to_toml(&AppConfig::default())?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(path, text)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}
