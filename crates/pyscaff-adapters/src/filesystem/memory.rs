//! In-memory filesystem adapter for tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use pyscaff_core::{
    application::{ApplicationError, ports::Filesystem},
    error::PyscaffResult,
};

/// In-memory filesystem. Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    executables: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content.
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read().files.get(path).cloned()
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        self.read().executables.contains(path)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read().files.keys().cloned().collect()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.write();
        inner.files.clear();
        inner.directories.clear();
        inner.executables.clear();
    }

    // A panic while holding the lock cannot leave the maps half-updated,
    // so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> PyscaffResult<()> {
        let mut inner = self.write();

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> PyscaffResult<()> {
        let mut inner = self.write();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> PyscaffResult<String> {
        self.read_file(path).ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> PyscaffResult<()> {
        let mut inner = self.write();

        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> PyscaffResult<()> {
        let mut inner = self.write();

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.executables.retain(|p| !p.starts_with(path));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/p/setup.py"), "").is_err());

        fs.create_dir_all(Path::new("/p")).unwrap();
        fs.write_file(Path::new("/p/setup.py"), "x").unwrap();
        assert_eq!(fs.read_to_string(Path::new("/p/setup.py")).unwrap(), "x");
    }

    #[test]
    fn remove_is_recursive() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/p/src/pkg")).unwrap();
        fs.write_file(Path::new("/p/src/pkg/__init__.py"), "").unwrap();
        fs.set_permissions(Path::new("/p/src/pkg/__init__.py"), true).unwrap();

        fs.remove_dir_all(Path::new("/p")).unwrap();

        assert!(!fs.exists(Path::new("/p")));
        assert!(!fs.exists(Path::new("/p/src/pkg")));
        assert!(fs.list_files().is_empty());
        assert!(fs.exists(Path::new("/")));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let view = fs.clone();
        fs.create_dir_all(Path::new("/p")).unwrap();
        fs.write_file(Path::new("/p/a"), "a").unwrap();
        fs.set_permissions(Path::new("/p/a"), true).unwrap();
        assert!(view.is_executable(Path::new("/p/a")));
        view.clear();
        assert!(!fs.exists(Path::new("/p/a")));
    }
}
