//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "edit until valid" or "scaffold a project".

pub mod classifier_service;
pub mod edit_session;
pub mod scaffold_service;

pub use classifier_service::load_catalog;
pub use edit_session::{CONTINUE_PROMPT, DEFAULT_FILE_NAME, EditSession};
pub use scaffold_service::{ScaffoldOptions, ScaffoldReport, ScaffoldService};
