//! `pyscaff config`: read configuration values.

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
            output.data(&value)?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.data(&to_toml(&config)?)?;
            }
        }

        ConfigCommands::Path => {
            output.data(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    config.get(key).ok_or_else(|| CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    })
}

pub(crate) fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "output.format").unwrap(), "auto");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn toml_has_every_section() {
        let text = to_toml(&AppConfig::default()).unwrap();
        for section in ["[defaults]", "[classifiers]", "[output]"] {
            assert!(text.contains(section), "missing {section} in:\n{text}");
        }
    }
}
