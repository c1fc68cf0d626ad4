//! pyscaff Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for pyscaff: a
//! schema-driven configuration editor that renders an annotated YAML
//! document, lets the operator edit it in their own editor, verifies it
//! with line-accurate errors, and scaffolds a Python project from the
//! accepted result.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           pyscaff-cli (CLI)             │
//! │   (Operator prompt, config, logging)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (EditSession, ScaffoldService)        │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Scratch, Editor, Filesystem, Render)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    pyscaff-adapters (Infrastructure)    │
//! │ (TempScratchSpace, ProcessLauncher, ..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Reader, FieldRule, Schema, Template)  │
//! │         No External I/O                 │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pyscaff_core::domain::{EditorCommand, FieldRule, Schema, checks};
//!
//! let schema = Schema::builder()
//!     .rule(
//!         FieldRule::new("name")
//!             .describe(["Project name"])
//!             .default_value("demo")
//!             .check(checks::text()),
//!     )
//!     .editor(EditorCommand::parse("vi")?)
//!     .build()?;
//!
//! let document = schema.verify("name: demo\n")?;
//! assert_eq!(document.str_value("name"), Some("demo"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Domain layer (pure logic)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        EditSession, ScaffoldOptions, ScaffoldService, load_catalog,
        ports::{
            ClassifierSource, EditorLauncher, Filesystem, Operator, ScratchFile, ScratchSpace,
            TemplateRenderer, VersionControl,
        },
    };
    pub use crate::domain::{
        ClassifierCatalog, Document, EditorCommand, LocatedError, ProjectConfig, ProjectDefaults,
        ProjectStructure, RenderContext, Schema, Template, project_schema,
    };
    pub use crate::error::{PyscaffError, PyscaffResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
