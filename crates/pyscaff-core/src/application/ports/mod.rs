//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `pyscaff-adapters` implement
//! these; the CLI implements the interactive operator.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateRenderer`: Template rendering
//!   - `ScratchSpace` / `ScratchFile`: The document under edit
//!   - `EditorLauncher`: External editor process
//!   - `Operator`: Error display and confirmation prompts
//!   - `ClassifierSource`: PyPI classifier lists
//!   - `VersionControl`: `git init` in the generated project

pub mod output;

pub use output::{
    ClassifierSource, EditorLauncher, Filesystem, Operator, ScratchFile, ScratchSpace,
    TemplateRenderer, VersionControl,
};
