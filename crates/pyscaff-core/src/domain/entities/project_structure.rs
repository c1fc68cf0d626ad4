use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{entities::common::Permissions, error::DomainError};

/// Final project structure ready for materialization.
///
/// This is the output of template rendering: paths relative to `root`,
/// contents fully substituted. No business logic, only data.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: String, perms: Permissions) {
        self.entries.push(FsEntry::File(FileToWrite {
            path: path.into(),
            content,
            permissions: perms,
        }));
    }

    pub fn add_directory(&mut self, path: impl Into<PathBuf>, perms: Permissions) {
        self.entries.push(FsEntry::Directory(DirectoryToCreate {
            path: path.into(),
            permissions: perms,
        }));
    }

    pub fn with_file(
        mut self,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        perms: Permissions,
    ) -> Self {
        self.add_file(path, content.into(), perms);
        self
    }

    pub fn with_directory(mut self, path: impl Into<PathBuf>, perms: Permissions) -> Self {
        self.add_directory(path, perms);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Project structure is empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();

            if path.is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: path.display().to_string(),
                });
            }

            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.display().to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<&FileToWrite> {
        self.files().find(|f| f.path == path.as_ref())
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &Path {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: PathBuf,
    pub content: String,
    pub permissions: Permissions,
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: PathBuf,
    pub permissions: Permissions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_structure_is_invalid() {
        assert!(ProjectStructure::new("out").validate().is_err());
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let s = ProjectStructure::new("out")
            .with_file("setup.py", "", Permissions::executable())
            .with_file("setup.py", "", Permissions::read_write());
        assert!(matches!(s.validate(), Err(DomainError::DuplicatePath { .. })));
    }

    #[test]
    fn lookups() {
        let s = ProjectStructure::new("out")
            .with_directory("tests/unit", Permissions::default())
            .with_file("LICENSE", "MIT", Permissions::default());
        assert!(s.validate().is_ok());
        assert_eq!(s.file("LICENSE").unwrap().content, "MIT");
        assert_eq!(s.directories().count(), 1);
        assert_eq!(s.entry_count(), 2);
    }
}
