//! Unified error handling for pyscaff core.
//!
//! Wraps setup, domain, application and located document errors with
//! user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, LocatedError, SetupError};

/// Root error type for pyscaff core operations.
#[derive(Debug, Error, Clone)]
pub enum PyscaffError {
    /// The schema itself is malformed. Never retried.
    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    /// Errors from the scaffolding model.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// A located document error surfaced outside the edit loop.
    #[error("Invalid document: {0}")]
    Document(#[from] LocatedError),
}

impl PyscaffError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Setup(e) => e.suggestions(),
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Document(e) => match e.line() {
                Some(line) => vec![format!("Fix line {line} and try again")],
                None => vec!["Fix the document and try again".into()],
            },
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Setup(_) => ErrorCategory::Configuration,
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Document(_) => ErrorCategory::Validation,
        }
    }

    /// Whether editing the document again can fix this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Document(_))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PyscaffResult<T> = Result<T, PyscaffError>;
