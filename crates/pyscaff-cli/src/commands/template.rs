//! `pyscaff template`: print the document `pyscaff new` opens.

use tracing::instrument;

use crate::{
    cli::TemplateArgs,
    commands::{build_schema, load_classifiers, new::validate_project_name},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: TemplateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    validate_project_name(&args.name)?;
    let catalog = load_classifiers(&config, &output)?;
    let schema = build_schema(&args.name, &config, None, &catalog)?;

    output.data(&schema.render_text())?;
    Ok(())
}
