//! Command handlers, one module per subcommand.
//!
//! The helpers here turn configuration into the inputs every document
//! command needs: the classifier catalog and the project schema.

use std::io::Read as _;
use std::path::Path;

use tracing::{debug, instrument};

use pyscaff_adapters::{BundledClassifiers, FileClassifiers};
use pyscaff_core::{
    application::{load_catalog, ports::ClassifierSource},
    domain::{ClassifierCatalog, EditorCommand, Schema, project_schema},
    error::PyscaffError,
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub mod check;
pub mod classifiers;
pub mod completions;
pub mod config;
pub mod init;
pub mod new;
pub mod template;

/// Project name used when a command has none of its own.
pub const DEFAULT_PROJECT_NAME: &str = "my-project";

/// Classifier sources in the order they are tried.
fn classifier_sources(config: &AppConfig) -> Vec<Box<dyn ClassifierSource>> {
    let mut sources: Vec<Box<dyn ClassifierSource>> = Vec::new();
    if let Some(path) = &config.classifiers.file {
        sources.push(Box::new(FileClassifiers::new(path)));
    }
    #[cfg(feature = "network")]
    {
        if config.classifiers.fetch {
            sources.push(Box::new(pyscaff_adapters::HttpClassifiers::new(
                config.classifiers.url.clone(),
            )));
        }
    }
    sources.push(Box::new(BundledClassifiers));
    sources
}

/// Load the classifier catalog, showing a spinner while sources are tried.
#[instrument(skip_all)]
pub fn load_classifiers(config: &AppConfig, output: &OutputManager) -> CliResult<ClassifierCatalog> {
    let sources = classifier_sources(config);
    debug!(
        sources = %sources.iter().map(|s| s.name()).collect::<Vec<_>>().join(", "),
        "Loading classifiers"
    );

    let spinner = output.spinner("Loading PyPI classifiers...");
    let catalog = load_catalog(&sources);
    spinner.finish_and_clear();

    catalog.with_cli_context(|| "loading classifiers")
}

/// Build the schema for `project_name`, resolving the editor from the flag,
/// the configuration and the environment.
pub fn build_schema(
    project_name: &str,
    config: &AppConfig,
    editor: Option<&str>,
    catalog: &ClassifierCatalog,
) -> CliResult<Schema> {
    let editor = EditorCommand::resolve(editor, config.editor.command.as_deref(), |name| {
        std::env::var(name).ok()
    })
    .map_err(PyscaffError::from)?;
    debug!(program = editor.program(), "Editor resolved");

    let defaults = config.defaults.for_project(project_name);
    project_schema(&defaults, catalog, editor).map_err(|e| CliError::Core(e.into()))
}

/// Read a document from `path`, or from stdin when `path` is `-`.
pub fn read_document(path: &Path) -> CliResult<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .with_cli_context(|| "Failed to read document from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read document '{}'", path.display()))
}
