//! Application layer for pyscaff.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (EditSession, ScaffoldService,
//!   classifier loading)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All document rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    EditSession, ScaffoldOptions, ScaffoldReport, ScaffoldService, load_catalog,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    ClassifierSource, EditorLauncher, Filesystem, Operator, ScratchFile, ScratchSpace,
    TemplateRenderer, VersionControl,
};

pub use error::ApplicationError;
