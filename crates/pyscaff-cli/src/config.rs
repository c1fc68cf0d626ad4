//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the values derived from
//! it (`ProjectDefaults`, the editor template, classifier sources).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `PYSCAFF__<SECTION>__<KEY>`
//! 3. Config file: `--config FILE`, else the platform config path
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing::debug;

use pyscaff_adapters::classifiers::PYPI_CLASSIFIERS_URL;
use pyscaff_core::domain::ProjectDefaults;

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "PYSCAFF";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Editor used for the edit-verify loop.
    pub editor: EditorConfig,
    /// Where the PyPI classifier list comes from.
    pub classifiers: ClassifierConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Identity and list defaults written into the rendered document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author_full_name: Option<String>,
    pub author_email: Option<String>,
    pub github_user: Option<String>,
    pub keywords: Vec<String>,
    pub platforms: Vec<String>,
    pub supported_pythons: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor template such as `code --wait --goto @NAME@:@LINE@`.
    pub command: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Local classifier list, tried first.
    pub file: Option<PathBuf>,
    /// Download location of the full list.
    pub url: String,
    /// Whether the list may be downloaded.
    pub fetch: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            file: None,
            url: PYPI_CLASSIFIERS_URL.into(),
            fetch: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Defaults {
    /// Document defaults for a project called `project_name`.
    pub fn for_project(&self, project_name: &str) -> ProjectDefaults {
        ProjectDefaults {
            author_full_name: self.author_full_name.clone(),
            author_email: self.author_email.clone(),
            github_user: self.github_user.clone(),
            keywords: self.keywords.clone(),
            platforms: self.platforms.clone(),
            supported_pythons: self.supported_pythons.clone(),
            ..ProjectDefaults::new(project_name)
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.
    /// Without it the platform path is read when present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("failed to serialise built-in defaults")?;
        let mut builder = config::Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                builder = builder.add_source(toml_file(path).required(true));
            }
            None => {
                let path = Self::config_path();
                debug!(path = %path.display(), "Looking for configuration file");
                builder = builder.add_source(toml_file(&path).required(false));
            }
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.pyscaff.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "pyscaff", "pyscaff")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".pyscaff.toml"))
    }

    /// Look up a dotted key such as `editor.command`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        let found = key
            .split('.')
            .try_fold(&value, |node, part| node.get(part))?;
        Some(match found {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

fn toml_file(path: &Path) -> config::File<config::FileSourceFile, config::FileFormat> {
    config::File::from(path).format(config::FileFormat::Toml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_fetch_from_pypi() {
        let cfg = AppConfig::default();
        assert!(cfg.classifiers.fetch);
        assert_eq!(cfg.classifiers.url, PYPI_CLASSIFIERS_URL);
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pyscaff.toml");
        std::fs::write(
            &path,
            "[defaults]\nauthor_full_name = \"Jane Doe\"\nkeywords = [\"cli\"]\n\n\
             [editor]\ncommand = \"nano\"\n\n[classifiers]\nfetch = false\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.author_full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(cfg.defaults.keywords, vec!["cli"]);
        assert_eq!(cfg.editor.command.as_deref(), Some("nano"));
        assert!(!cfg.classifiers.fetch);
        assert_eq!(cfg.classifiers.url, PYPI_CLASSIFIERS_URL);
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let path = PathBuf::from("/nonexistent/pyscaff.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn defaults_map_to_project_defaults() {
        let defaults = Defaults {
            github_user: Some("janedoe".into()),
            ..Defaults::default()
        };
        let project = defaults.for_project("demo-app");
        assert_eq!(project.project_name, "demo-app");
        assert_eq!(project.github_user.as_deref(), Some("janedoe"));
        assert_eq!(project.package_name(), "demo_app");
    }

    #[test]
    fn dotted_lookup() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("classifiers.fetch").as_deref(), Some("true"));
        assert_eq!(cfg.get("editor.command").as_deref(), Some(""));
        assert_eq!(cfg.get("nope.nothing"), None);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
