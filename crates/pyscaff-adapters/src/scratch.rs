//! Scratch documents backed by a private temporary directory.
//!
//! Each document gets its own directory so the file keeps a stable,
//! human-friendly name (editors pick syntax modes from the extension).
//! Dropping the handle removes the directory and everything in it.

use std::path::{Path, PathBuf};

use pyscaff_core::{
    application::{
        ApplicationError,
        ports::{ScratchFile, ScratchSpace},
    },
    error::PyscaffResult,
};
use tempfile::TempDir;
use tracing::{debug, instrument, warn};

const DIR_PREFIX: &str = "pyscaff-";

/// Creates scratch files under the system temporary directory, or under a
/// chosen parent.
#[derive(Debug, Clone, Default)]
pub struct TempScratchSpace {
    parent: Option<PathBuf>,
}

impl TempScratchSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place scratch directories under `parent` instead of the system default.
    pub fn in_dir(parent: impl Into<PathBuf>) -> Self {
        Self {
            parent: Some(parent.into()),
        }
    }
}

impl ScratchSpace for TempScratchSpace {
    #[instrument(skip(self, contents))]
    fn create(&self, name: &str, contents: &str) -> PyscaffResult<Box<dyn ScratchFile>> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(DIR_PREFIX);
        let dir = match &self.parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
        .map_err(|e| scratch_error(self.parent.as_deref().unwrap_or(Path::new(".")), e))?;

        let path = dir.path().join(name);
        std::fs::write(&path, contents).map_err(|e| scratch_error(&path, e))?;
        debug!(path = %path.display(), "Created scratch file");

        Ok(Box::new(TempScratchFile { dir: Some(dir), path }))
    }
}

/// A scratch file that lives as long as its temporary directory.
#[derive(Debug)]
pub struct TempScratchFile {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl ScratchFile for TempScratchFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> PyscaffResult<String> {
        std::fs::read_to_string(&self.path).map_err(|e| scratch_error(&self.path, e))
    }
}

impl Drop for TempScratchFile {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let location = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => debug!(path = %location.display(), "Removed scratch directory"),
                Err(e) => warn!(path = %location.display(), error = %e, "Failed to remove scratch directory"),
            }
        }
    }
}

fn scratch_error(path: &Path, e: std::io::Error) -> pyscaff_core::error::PyscaffError {
    ApplicationError::ScratchError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_is_written_and_read_back() {
        let parent = TempDir::new().unwrap();
        let space = TempScratchSpace::in_dir(parent.path());

        let file = space.create("config.yaml", "name: demo\n").unwrap();
        assert_eq!(file.path().file_name().unwrap(), "config.yaml");
        assert!(file.path().starts_with(parent.path()));
        assert_eq!(file.read().unwrap(), "name: demo\n");

        std::fs::write(file.path(), "name: edited\n").unwrap();
        assert_eq!(file.read().unwrap(), "name: edited\n");
    }

    #[test]
    fn drop_removes_the_file() {
        let parent = TempDir::new().unwrap();
        let space = TempScratchSpace::in_dir(parent.path());

        let file = space.create("config.yaml", "").unwrap();
        let path = file.path().to_path_buf();
        assert!(path.exists());

        drop(file);
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn read_after_external_delete_is_scratch_error() {
        let space = TempScratchSpace::new();
        let file = space.create("config.yaml", "").unwrap();
        std::fs::remove_file(file.path()).unwrap();

        let err = file.read().unwrap_err();
        assert!(matches!(
            err,
            pyscaff_core::error::PyscaffError::Application(ApplicationError::ScratchError { .. })
        ));
    }
}
