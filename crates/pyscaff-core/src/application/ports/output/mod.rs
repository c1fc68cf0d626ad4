//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `pyscaff-adapters` crate provides implementations; the CLI provides
//! the interactive [`Operator`].

use std::path::Path;

use crate::domain::{Invocation, LocatedError, ProjectStructure, RenderContext, Template};
use crate::error::PyscaffResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `pyscaff_adapters::filesystem::LocalFilesystem` (production)
/// - `pyscaff_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PyscaffResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> PyscaffResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> PyscaffResult<String>;

    /// Set the executable bit (`chmod a+x`) or clear it.
    fn set_permissions(&self, path: &Path, executable: bool) -> PyscaffResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> PyscaffResult<()>;
}

/// Port for template rendering.
///
/// Implemented by `pyscaff_adapters::renderer::SimpleRenderer`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render the nodes of `template` whose conditions hold in `context`
    /// into a project structure rooted at `output_root`.
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> PyscaffResult<ProjectStructure>;
}

/// The document being edited. Dropping it removes the backing file.
pub trait ScratchFile: Send {
    fn path(&self) -> &Path;

    /// Current contents, as left by the editor.
    fn read(&self) -> PyscaffResult<String>;
}

/// Creates scratch files for the edit-verify loop.
///
/// Implemented by `pyscaff_adapters::scratch::TempScratchSpace`.
#[cfg_attr(test, mockall::automock)]
pub trait ScratchSpace: Send + Sync {
    fn create(&self, name: &str, contents: &str) -> PyscaffResult<Box<dyn ScratchFile>>;
}

/// Runs the external editor and blocks until it exits.
///
/// Implemented by `pyscaff_adapters::editor::ProcessLauncher`.
#[cfg_attr(test, mockall::automock)]
pub trait EditorLauncher: Send + Sync {
    /// Returns the exit code, if the process reported one.
    fn launch(&self, invocation: &Invocation) -> PyscaffResult<Option<i32>>;
}

/// The human driving the edit-verify loop.
#[cfg_attr(test, mockall::automock)]
pub trait Operator: Send + Sync {
    /// Show a located error.
    fn report(&self, error: &LocatedError);

    /// Ask a yes/no question.
    fn confirm(&self, question: &str, default: bool) -> PyscaffResult<bool>;
}

/// One place PyPI classifiers can come from.
///
/// Implemented by `pyscaff_adapters::classifiers::{FileClassifiers,
/// HttpClassifiers, BundledClassifiers}`.
#[cfg_attr(test, mockall::automock)]
pub trait ClassifierSource: Send + Sync {
    fn name(&self) -> &str;

    fn load(&self) -> PyscaffResult<Vec<String>>;
}

/// Repository initialisation in a freshly generated project.
///
/// Implemented by `pyscaff_adapters::vcs::GitCli`.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    /// Initialise a repository at `root` and set the commit identity.
    fn init(&self, root: &Path, user: &str, email: &str) -> PyscaffResult<()>;
}
