//! `pyscaff check`: verify a project document without an editor.

use tracing::{info, instrument};

use pyscaff_core::{domain::ProjectConfig, error::PyscaffError};

use crate::{
    cli::CheckArgs,
    commands::{DEFAULT_PROJECT_NAME, build_schema, load_classifiers, read_document},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let text = read_document(&args.file)?;
    let catalog = load_classifiers(&config, &output)?;
    let schema = build_schema(DEFAULT_PROJECT_NAME, &config, None, &catalog)?;

    let document = schema.verify(&text).map_err(|error| CliError::InvalidDocument {
        path: args.file.clone(),
        error,
    })?;
    let project = ProjectConfig::from_document(&document).map_err(PyscaffError::from)?;
    info!(project = %project.project_name, "Document verified");

    if args.json || output.is_json() {
        output.json(&project)?;
        return Ok(());
    }

    output.success(&format!("{} is valid", args.file.display()))?;
    output.print(&format!("  Project: {}", project.project_name))?;
    output.print(&format!("  Package: {}", project.module_path()))?;
    output.print(&format!("  Type:    {}", project.project_type))?;
    if let Some(target) = project.entry_point_target() {
        output.print(&format!("  Entry:   {target}"))?;
    }
    Ok(())
}
