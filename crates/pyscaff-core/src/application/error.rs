//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not document
//! validation. Located document errors live in `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The scratch document could not be created, read or removed.
    #[error("Scratch file error at {path}: {reason}")]
    ScratchError { path: PathBuf, reason: String },

    /// The editor process could not be started.
    #[error("Failed to launch editor '{program}': {reason}")]
    EditorLaunch { program: String, reason: String },

    /// Operator interaction failed (closed terminal, broken input).
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// No classifier source produced a list.
    #[error("No classifier source is available (tried: {tried})")]
    ClassifiersUnavailable { tried: String },

    /// A single classifier source failed.
    #[error("Classifier source '{source_name}' failed: {reason}")]
    ClassifierSource { source_name: String, reason: String },

    /// Version control initialisation failed.
    #[error("Version control command failed: {reason}")]
    VersionControl { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::EditorLaunch { program, .. } => vec![
                format!("Check that '{program}' is installed and on PATH"),
                "Pass --editor or set EDITOR to a working editor".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different project name or output directory".into(),
            ],
            Self::ClassifiersUnavailable { .. } => vec![
                "Point [classifiers] file at a local classifier list".into(),
                "Or enable [classifiers] fetch with network access".into(),
            ],
            Self::VersionControl { .. } => vec![
                "Check that git is installed and on PATH".into(),
                "The project files were written; run 'git init' manually".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. }
            | Self::RollbackFailed { .. }
            | Self::ScratchError { .. }
            | Self::RenderingFailed { .. } => ErrorCategory::Internal,
            Self::EditorLaunch { .. } | Self::ClassifiersUnavailable { .. } => {
                ErrorCategory::Configuration
            }
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::PromptFailed { .. }
            | Self::ClassifierSource { .. }
            | Self::VersionControl { .. } => ErrorCategory::Internal,
        }
    }
}
