//! Scaffold Service - turns an accepted configuration into a project tree.
//!
//! This service coordinates the generation workflow:
//! 1. Build the render context from the projected configuration
//! 2. Render the template
//! 3. Write to filesystem, rolling back on failure
//! 4. Optionally initialise version control

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, VersionControl},
    },
    domain::{
        DomainValidator as validator, FsEntry, ProjectConfig, ProjectStructure, RenderContext,
        Template,
    },
    error::PyscaffResult,
};

/// Knobs for a single scaffold run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaffoldOptions {
    /// Replace an existing project directory instead of refusing.
    pub force: bool,
}

/// Summary of a completed scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub files: usize,
    pub directories: usize,
    pub git_initialized: bool,
}

/// Main scaffolding service.
///
/// Owns the template; rendering, filesystem and version control are
/// injected.
pub struct ScaffoldService {
    template: Template,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    vcs: Option<Box<dyn VersionControl>>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use pyscaff_core::application::{
    ///     ScaffoldService,
    ///     ports::{Filesystem, TemplateRenderer},
    /// };
    /// use pyscaff_core::domain::Template;
    ///
    /// fn service(
    ///     template: Template,
    ///     renderer: Box<dyn TemplateRenderer>,
    ///     filesystem: Box<dyn Filesystem>,
    /// ) -> ScaffoldService {
    ///     ScaffoldService::new(template, renderer, filesystem)
    /// }
    /// ```
    pub fn new(
        template: Template,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            template,
            renderer,
            filesystem,
            vcs: None,
        }
    }

    /// Enable repository initialisation for configs that ask for it.
    pub fn with_version_control(mut self, vcs: Box<dyn VersionControl>) -> Self {
        self.vcs = Some(vcs);
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Directory the project for `config` is generated into.
    pub fn project_root(config: &ProjectConfig, output_root: &Path) -> PathBuf {
        output_root.join(&config.project_name)
    }

    /// Render without touching the filesystem.
    #[instrument(skip_all, fields(project = %config.project_name))]
    pub fn plan(&self, config: &ProjectConfig, output_root: &Path) -> PyscaffResult<ProjectStructure> {
        validator::validate_template(&self.template)?;

        let context = RenderContext::for_project(config);
        let root = Self::project_root(config, output_root);
        let structure = self.renderer.render(&self.template, &context, &root)?;
        validator::validate_project_structure(&structure)?;

        info!(
            entries = structure.entry_count(),
            template = %self.template.name,
            "Template rendered"
        );
        Ok(structure)
    }

    /// Scaffold a new project.
    #[instrument(
        skip_all,
        fields(
            project = %config.project_name,
            output_path = %output_root.display()
        )
    )]
    pub fn scaffold(
        &self,
        config: &ProjectConfig,
        output_root: &Path,
        options: ScaffoldOptions,
    ) -> PyscaffResult<ScaffoldReport> {
        info!(project_type = %config.project_type, "Scaffolding project");

        let structure = self.plan(config, output_root)?;
        self.write_structure(&structure, options)?;

        let git_initialized = self.init_repository(config, structure.root())?;

        info!("Scaffold completed successfully");
        Ok(ScaffoldReport {
            root: structure.root().to_path_buf(),
            files: structure.files().count(),
            directories: structure.directories().count(),
            git_initialized,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write project structure to filesystem with rollback on failure.
    fn write_structure(
        &self,
        structure: &ProjectStructure,
        options: ScaffoldOptions,
    ) -> PyscaffResult<()> {
        if self.filesystem.exists(structure.root()) {
            if !options.force {
                return Err(ApplicationError::ProjectExists {
                    path: structure.root().to_path_buf(),
                }
                .into());
            }
            warn!(path = %structure.root().display(), "Replacing existing project");
            self.filesystem.remove_dir_all(structure.root())?;
        }

        match self.write_all(structure) {
            Ok(()) => {
                info!("Successfully wrote all files");
                Ok(())
            }
            Err(e) => {
                warn!("Write failed, attempting rollback");
                self.rollback(structure.root());
                Err(e)
            }
        }
    }

    /// Write all entries in the structure.
    fn write_all(&self, structure: &ProjectStructure) -> PyscaffResult<()> {
        self.filesystem.create_dir_all(structure.root())?;

        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    let path = structure.root().join(&dir.path);
                    self.filesystem.create_dir_all(&path)?;
                }
                FsEntry::File(file) => {
                    let path = structure.root().join(&file.path);

                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }

                    self.filesystem.write_file(&path, &file.content)?;

                    if file.permissions.executable_flag() {
                        self.filesystem.set_permissions(&path, true)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }

    fn init_repository(&self, config: &ProjectConfig, root: &Path) -> PyscaffResult<bool> {
        if !config.initialize_git {
            return Ok(false);
        }
        let Some(vcs) = &self.vcs else {
            warn!("Repository initialisation requested but no version control is configured");
            return Ok(false);
        };
        vcs.init(root, &config.github_user, &config.github_email)?;
        info!(path = %root.display(), "Repository initialised");
        Ok(true)
    }
}
