//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use pyscaff_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{PyscaffError, PyscaffResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> PyscaffResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> PyscaffResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> PyscaffResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> PyscaffResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata =
                std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
            let mut perms = metadata.permissions();
            let mode = perms.mode();
            perms.set_mode(if executable { mode | 0o111 } else { mode & !0o111 });
            std::fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(windows)]
        {
            // Windows doesn't have executable bit in the same way
            let _ = (path, executable);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> PyscaffResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PyscaffError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_read_remove() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = temp.path().join("proj/src");

        fs.create_dir_all(&dir).unwrap();
        fs.write_file(&dir.join("setup.py"), "print()").unwrap();
        assert_eq!(fs.read_to_string(&dir.join("setup.py")).unwrap(), "print()");

        fs.remove_dir_all(&temp.path().join("proj")).unwrap();
        assert!(!fs.exists(&dir));
    }

    #[cfg(unix)]
    #[test]
    fn toggles_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = temp.path().join("setup.py");
        fs.write_file(&path, "#!/usr/bin/env python3\n").unwrap();

        fs.set_permissions(&path, true).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);

        fs.set_permissions(&path, false).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0);
    }

    #[test]
    fn missing_file_maps_to_filesystem_error() {
        let err = LocalFilesystem::new()
            .read_to_string(Path::new("/nonexistent/pyscaff/file"))
            .unwrap_err();
        assert!(matches!(
            err,
            PyscaffError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
