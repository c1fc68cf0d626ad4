// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for pyscaff.
//!
//! Pure logic only: the line-tracking reader, field rules and the schema
//! registry, the project schema, and the scaffolding model. All process,
//! filesystem and network concerns are reached through ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable schema**: rules are built once and shared read-only
pub mod checks;
pub mod classifiers;
pub mod editor;
pub mod entities;
pub mod error;
pub mod pattern;
pub mod project;
pub mod reader;
pub mod rule;
pub mod schema;
pub mod value;

mod validation;

pub use checks::{Check, ListPolicy, SortKey};
pub use classifiers::ClassifierCatalog;
pub use editor::{EditorCommand, Invocation};
pub use entities::{
    EntryPoint, ProjectConfig, ProjectStructure, RenderContext, Template,
    common::{Permissions, RelativePath},
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry},
    template::{
        DirectorySpec, FileSpec, NodeCondition, TemplateBuilder, TemplateContent, TemplateNode,
        TemplateSource,
    },
};
pub use error::{DomainError, LocatedError, LocatedKind, SetupError};
pub use pattern::Pattern;
pub use project::{KNOWN_PYTHONS, ProjectDefaults, ProjectType, project_schema};
pub use rule::{Condition, FieldRule};
pub use schema::{Schema, SchemaBuilder};
pub use validation::DomainValidator;
pub use value::{Document, Entry, Located, Value};
