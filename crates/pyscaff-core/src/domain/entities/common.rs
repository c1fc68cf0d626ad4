use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// A filesystem path guaranteed to stay inside the project root.
///
/// Invariant: never absolute, never climbs with `..`. Enforced at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let escapes = path.components().any(|c| {
            matches!(
                c,
                Component::RootDir | Component::Prefix(_) | Component::ParentDir
            )
        });
        if escapes || path.as_os_str().is_empty() {
            Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// File mode requested for a rendered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    executable: bool,
}

impl Permissions {
    pub const fn read_write() -> Self {
        Self { executable: false }
    }

    pub const fn executable() -> Self {
        Self { executable: true }
    }

    pub const fn executable_flag(&self) -> bool {
        self.executable
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::read_write()
    }
}
