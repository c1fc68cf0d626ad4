//! Implementation of the `pyscaff new` command.
//!
//! Responsibility: wire adapters into the edit session and the scaffold
//! service, and display results. No business logic lives here.

use serde::Serialize;
use tracing::{debug, info, instrument};

use pyscaff_adapters::{
    GitCli, LocalFilesystem, ProcessLauncher, SimpleRenderer, TempScratchSpace, builtin_templates,
};
use pyscaff_core::{
    application::{EditSession, ScaffoldOptions, ScaffoldService},
    domain::{Document, FsEntry, ProjectConfig, ProjectStructure, Schema, Template},
    error::PyscaffError,
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    commands::{build_schema, load_classifiers, read_document},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::TerminalOperator,
};

/// Execute the `pyscaff new` command.
///
/// Dispatch sequence:
/// 1. Validate the project name and pick the built-in template
/// 2. Build the schema from configuration and the classifier catalog
/// 3. Edit-verify loop (or verify `--from FILE` once)
/// 4. Project the document into a `ProjectConfig`
/// 5. Early-exit if `--dry-run`
/// 6. Scaffold and print next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Name and template
    validate_project_name(&args.name)?;
    let template = find_template(&args.template)?;

    // 2. Schema
    let catalog = load_classifiers(&config, &output)?;
    let schema = build_schema(&args.name, &config, args.editor.as_deref(), &catalog)?;

    // 3. Document
    let document = match &args.from {
        Some(path) => {
            let text = read_document(path)?;
            schema.verify(&text).map_err(|error| CliError::InvalidDocument {
                path: path.clone(),
                error,
            })?
        }
        None => edit(schema, &output)?,
    };

    // 4. Projection
    let project = ProjectConfig::from_document(&document).map_err(PyscaffError::from)?;
    debug!(
        project_type = %project.project_type,
        package = %project.module_path(),
        "Document projected"
    );

    let service = ScaffoldService::new(
        template,
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_version_control(Box::new(GitCli::new()));
    let project_root = ScaffoldService::project_root(&project, &args.output);

    // 5. Dry run: describe but do not write.
    if args.dry_run {
        let structure = service.plan(&project, &args.output)?;
        return show_plan(&structure, &output);
    }

    // 6. Scaffold
    output.header(&format!("Creating '{}'...", project.project_name))?;
    info!(path = %project_root.display(), "Scaffold started");

    let report = service.scaffold(
        &project,
        &args.output,
        ScaffoldOptions { force: args.force },
    )?;

    info!(files = report.files, "Scaffold completed");

    if output.is_json() {
        output.json(&NewSummary {
            root: report.root.display().to_string(),
            files: report.files,
            directories: report.directories,
            git_initialized: report.git_initialized,
            config: &project,
        })?;
        return Ok(());
    }

    output.success(&format!(
        "Project '{}' created ({} files)",
        project.project_name, report.files
    ))?;
    if report.git_initialized {
        output.info("Initialised a git repository")?;
    }

    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", project_root.display()))?;
        output.print("  tox")?;
    }

    Ok(())
}

/// Run the interactive edit-verify loop.
fn edit(schema: Schema, output: &OutputManager) -> CliResult<Document> {
    output.info(&format!(
        "Opening the project document in '{}'",
        schema.editor().program()
    ))?;

    let operator = TerminalOperator::new(!output.supports_color());
    let session = EditSession::new(
        schema,
        Box::new(TempScratchSpace::new()),
        Box::new(ProcessLauncher::new()),
        Box::new(operator),
    );

    session.run()?.ok_or(CliError::Cancelled)
}

fn find_template(name: &str) -> CliResult<Template> {
    match builtin_templates::find(name) {
        Some(template) => template.map_err(|e| CliError::Core(e.into())),
        None => Err(CliError::TemplateNotFound {
            name: name.to_owned(),
            available: builtin_templates::names().to_vec(),
        }),
    }
}

#[derive(Serialize)]
struct NewSummary<'a> {
    root: String,
    files: usize,
    directories: usize,
    git_initialized: bool,
    config: &'a ProjectConfig,
}

#[derive(Serialize)]
struct PlannedEntry {
    path: String,
    kind: &'static str,
    executable: bool,
}

fn show_plan(structure: &ProjectStructure, output: &OutputManager) -> CliResult<()> {
    let entries: Vec<PlannedEntry> = structure
        .entries()
        .iter()
        .map(|entry| match entry {
            FsEntry::File(f) => PlannedEntry {
                path: f.path.display().to_string(),
                kind: "file",
                executable: f.permissions.executable_flag(),
            },
            FsEntry::Directory(d) => PlannedEntry {
                path: d.path.display().to_string(),
                kind: "directory",
                executable: false,
            },
        })
        .collect();

    if output.is_json() {
        output.json(&entries)?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would create {} entries at {}",
        entries.len(),
        structure.root().display()
    ))?;
    for entry in &entries {
        let marker = if entry.executable { " (executable)" } else { "" };
        output.data(&format!("  {}{marker}", entry.path))?;
    }
    Ok(())
}

// ── Name validation ───────────────────────────────────────────────────────────

pub fn validate_project_name(name: &str) -> CliResult<()> {
    let invalid = |reason: &str| -> CliResult<()> {
        Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        })
    };

    if name.is_empty() {
        return invalid("name cannot be empty");
    }
    if name.contains('/') || name.contains('\\') {
        return invalid("name cannot contain path separators");
    }
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return invalid("name must start with a letter");
    }
    if name.len() < 3 {
        return invalid("name must be at least three characters long");
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return invalid(&format!("character '{c}' is not allowed"));
    }
    Ok(())
}
