//! `pyscaff classifiers`: list the classifiers a document may use.

use tracing::instrument;

use crate::{
    cli::{ClassifiersArgs, ListFormat},
    commands::load_classifiers,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: ClassifiersArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = load_classifiers(&config, &output)?;

    let selected: Vec<&str> = match &args.filter {
        Some(filter) => catalog.matching(filter).collect(),
        None => catalog.iter().collect(),
    };

    if args.format == ListFormat::Json || output.is_json() {
        output.json(&selected)?;
        return Ok(());
    }

    for classifier in &selected {
        output.data(classifier)?;
    }
    Ok(())
}
