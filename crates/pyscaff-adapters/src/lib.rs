//! Infrastructure adapters for pyscaff.
//!
//! This crate implements the ports defined in `pyscaff-core::application::ports`.
//! It contains all process, filesystem and network I/O.

pub mod builtin_templates;
pub mod classifiers;
pub mod editor;
pub mod filesystem;
pub mod renderer;
pub mod scratch;
pub mod vcs;

// Re-export commonly used adapters
#[cfg(feature = "network")]
pub use classifiers::HttpClassifiers;
pub use classifiers::{BundledClassifiers, FileClassifiers};
pub use editor::ProcessLauncher;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use scratch::TempScratchSpace;
pub use vcs::GitCli;
